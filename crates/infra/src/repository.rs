//! Author persistence abstraction plus the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use thiserror::Error;

use bookshelf_authors::Author;
use bookshelf_core::AuthorId;

/// Storage failure during a find/persist/remove call.
///
/// The pipeline catches these at its boundary; they never reach handlers
/// as raw errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Find/persist/remove contract consumed by the mutation pipeline.
///
/// `persist` is insert-or-update: a record without an identifier gets one
/// assigned (plus `created_at`); an existing record is replaced in place
/// with `updated_at` bumped. The store provides its own atomicity per call;
/// concurrent edits are last-writer-wins.
pub trait AuthorRepository: Send + Sync {
    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError>;
    fn find_all(&self) -> Result<Vec<Author>, RepositoryError>;
    fn persist(&self, author: Author) -> Result<Author, RepositoryError>;
    fn remove(&self, id: AuthorId) -> Result<(), RepositoryError>;
}

impl<R> AuthorRepository for Arc<R>
where
    R: AuthorRepository + ?Sized,
{
    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        (**self).find_all()
    }

    fn persist(&self, author: Author) -> Result<Author, RepositoryError> {
        (**self).persist(author)
    }

    fn remove(&self, id: AuthorId) -> Result<(), RepositoryError> {
        (**self).remove(id)
    }
}

/// In-memory author store for dev and tests.
#[derive(Debug, Default)]
pub struct InMemoryAuthorRepository {
    inner: RwLock<HashMap<AuthorId, Author>>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuthorRepository for InMemoryAuthorRepository {
    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| RepositoryError::storage("author store lock poisoned"))?;
        Ok(map.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        let map = self
            .inner
            .read()
            .map_err(|_| RepositoryError::storage("author store lock poisoned"))?;
        let mut authors: Vec<Author> = map.values().cloned().collect();
        // Stable listing order for rendered pages.
        authors.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        Ok(authors)
    }

    fn persist(&self, mut author: Author) -> Result<Author, RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::storage("author store lock poisoned"))?;
        let now = Utc::now();
        let id = match author.id {
            Some(id) => id,
            None => {
                let id = AuthorId::new();
                author.id = Some(id);
                author.created_at = now;
                id
            }
        };
        author.updated_at = now;
        map.insert(id, author.clone());
        Ok(author)
    }

    fn remove(&self, id: AuthorId) -> Result<(), RepositoryError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| RepositoryError::storage("author store lock poisoned"))?;
        map.remove(&id);
        Ok(())
    }
}
