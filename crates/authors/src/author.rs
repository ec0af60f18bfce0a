use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshelf_core::AuthorId;

/// A book written by an author.
///
/// Only the count cross-check in the update flow looks at this collection;
/// the book side of the relationship is otherwise out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
        }
    }
}

/// The Author entity.
///
/// `id` stays `None` until the repository persists the record for the first
/// time and assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<AuthorId>,
    pub email: String,
    pub username: String,
    pub nb_books: i64,
    pub books: Vec<Book>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// A fresh, not-yet-persisted author with seed field values.
    pub fn seed() -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email: "test@gmail.com".to_string(),
            username: "foulen".to_string(),
            nb_books: 0,
            books: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a submission into this snapshot, returning a new candidate.
    ///
    /// Identity, books, and timestamps carry over untouched; only the
    /// form-editable fields are overwritten. The receiver is never mutated,
    /// so a rejected candidate can simply be dropped.
    pub fn with_submission(&self, submission: &AuthorSubmission) -> Self {
        Self {
            email: submission.email.clone(),
            username: submission.username.clone(),
            nb_books: submission.nb_books,
            ..self.clone()
        }
    }

    /// Whether the stored book count matches the actual collection size.
    ///
    /// Detection only; callers must not auto-correct the field based on this.
    pub fn book_count_in_sync(&self) -> bool {
        usize::try_from(self.nb_books).is_ok_and(|n| n == self.books.len())
    }
}

/// Submitted form fields for creating or updating an author.
///
/// Immutable value carried alongside the request; binding happens through
/// [`Author::with_submission`] rather than by mutating a shared entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSubmission {
    pub email: String,
    pub username: String,
    pub nb_books: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_author_has_no_identifier() {
        let author = Author::seed();
        assert!(author.id.is_none());
        assert_eq!(author.username, "foulen");
        assert_eq!(author.nb_books, 0);
        assert!(author.books.is_empty());
    }

    #[test]
    fn with_submission_overwrites_form_fields_only() {
        let mut base = Author::seed();
        base.id = Some(AuthorId::new());
        base.books.push(Book::new("Dune"));

        let submission = AuthorSubmission {
            email: "bob@example.com".to_string(),
            username: "bob".to_string(),
            nb_books: 4,
        };
        let candidate = base.with_submission(&submission);

        assert_eq!(candidate.email, "bob@example.com");
        assert_eq!(candidate.username, "bob");
        assert_eq!(candidate.nb_books, 4);
        assert_eq!(candidate.id, base.id);
        assert_eq!(candidate.books, base.books);
        assert_eq!(candidate.created_at, base.created_at);
        // Receiver is untouched.
        assert_eq!(base.username, "foulen");
    }

    #[test]
    fn book_count_in_sync_compares_against_collection_size() {
        let mut author = Author::seed();
        assert!(author.book_count_in_sync());

        author.books.push(Book::new("Dune"));
        assert!(!author.book_count_in_sync());

        author.nb_books = 1;
        assert!(author.book_count_in_sync());

        author.nb_books = -1;
        assert!(!author.book_count_in_sync());
    }
}
