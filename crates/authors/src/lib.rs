//! `bookshelf-authors` — the Author domain.
//!
//! Pure domain types and validation; no I/O, no HTTP, no storage.

pub mod author;
pub mod validate;

pub use author::{Author, AuthorSubmission, Book};
pub use validate::validate;
