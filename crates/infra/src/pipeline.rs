//! Entity mutation pipeline (application-level orchestration).
//!
//! One invocation runs locate → bind → validate → business rules →
//! persist, then reports a single tagged outcome. Handlers only branch on
//! the tag; no error of any kind crosses the pipeline boundary.

use bookshelf_authors::{validate, Author, AuthorSubmission};
use bookshelf_core::{AuthorId, DomainError};

use crate::repository::{AuthorRepository, RepositoryError};

/// Result classification of one pipeline invocation.
///
/// Exactly one tag per invocation. `NeedsCorrection` and `AwaitingInput`
/// carry the entity snapshot the form should be re-rendered with.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(AuthorId),
    Updated(AuthorId),
    Deleted(AuthorId),
    NeedsCorrection { reason: String, author: Author },
    NotFound,
    AwaitingInput(Author),
    Failed(String),
}

/// Orchestrates create/update/delete over an [`AuthorRepository`].
///
/// The pipeline owns the in-memory entity for the duration of one call.
/// Rejected candidates are returned inside the outcome and never persisted.
pub struct MutationPipeline<R> {
    repo: R,
}

impl<R: AuthorRepository> MutationPipeline<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Create flow: seed a fresh author, bind the submission if present,
    /// validate, persist on success.
    pub fn create(&self, submission: Option<&AuthorSubmission>) -> MutationOutcome {
        let seed = Author::seed();
        let Some(submission) = submission else {
            return MutationOutcome::AwaitingInput(seed);
        };

        let candidate = seed.with_submission(submission);
        if let Err(err) = validate(&candidate) {
            return needs_correction(err, candidate);
        }

        match self.repo.persist(candidate) {
            Ok(saved) => created(saved),
            Err(err) => failed("create", err),
        }
    }

    /// Persist a seed author without any form input (fixture shortcut).
    pub fn quick_add(&self) -> MutationOutcome {
        match self.repo.persist(Author::seed()) {
            Ok(saved) => created(saved),
            Err(err) => failed("quick-add", err),
        }
    }

    /// Update flow: locate, bind, validate, run the count cross-check,
    /// persist in place.
    pub fn update(&self, id: AuthorId, submission: Option<&AuthorSubmission>) -> MutationOutcome {
        let current = match self.repo.find_by_id(id) {
            Ok(Some(author)) => author,
            Ok(None) => return MutationOutcome::NotFound,
            Err(err) => return failed("locate", err),
        };

        let Some(submission) = submission else {
            return MutationOutcome::AwaitingInput(current);
        };

        let candidate = current.with_submission(submission);
        if let Err(err) = validate(&candidate) {
            return needs_correction(err, candidate);
        }

        // Cross-check between the stored count and the actual collection.
        // Detection only: a mismatch neither blocks the save nor rewrites
        // the submitted value.
        if !candidate.book_count_in_sync() {
            tracing::warn!(
                author_id = %id,
                nb_books = candidate.nb_books,
                actual = candidate.books.len(),
                "book count does not match the books collection"
            );
        }

        match self.repo.persist(candidate) {
            Ok(_) => MutationOutcome::Updated(id),
            Err(err) => failed("update", err),
        }
    }

    /// Delete flow, with an explicit not-found guard before removal.
    pub fn delete(&self, id: AuthorId) -> MutationOutcome {
        match self.repo.find_by_id(id) {
            Ok(Some(_)) => {}
            Ok(None) => return MutationOutcome::NotFound,
            Err(err) => return failed("locate", err),
        }
        match self.repo.remove(id) {
            Ok(()) => MutationOutcome::Deleted(id),
            Err(err) => failed("delete", err),
        }
    }
}

fn created(saved: Author) -> MutationOutcome {
    match saved.id {
        Some(id) => MutationOutcome::Created(id),
        // A repository that returns an id-less record after persist is broken.
        None => MutationOutcome::Failed("repository did not assign an identifier".to_string()),
    }
}

fn needs_correction(err: DomainError, author: Author) -> MutationOutcome {
    let reason = match err {
        DomainError::Validation(msg) => msg,
        other => other.to_string(),
    };
    MutationOutcome::NeedsCorrection { reason, author }
}

fn failed(step: &str, err: RepositoryError) -> MutationOutcome {
    tracing::error!(step, error = %err, "mutation pipeline persistence step failed");
    MutationOutcome::Failed(format!("{step}: {err}"))
}
