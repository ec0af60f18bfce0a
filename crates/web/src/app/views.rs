//! Template view models and form DTOs mapped to/from domain types.

use serde::{Deserialize, Serialize};

use bookshelf_authors::{Author, AuthorSubmission};

/// Author as rendered on the listing and detail pages.
#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub email: String,
    pub username: String,
    pub nb_books: i64,
    pub book_titles: Vec<String>,
}

impl AuthorView {
    pub fn from_author(author: &Author) -> Self {
        Self {
            id: author.id.map(|id| id.to_string()).unwrap_or_default(),
            email: author.email.clone(),
            username: author.username.clone(),
            nb_books: author.nb_books,
            book_titles: author.books.iter().map(|b| b.title.clone()).collect(),
        }
    }
}

/// Raw form fields exactly as posted.
///
/// Everything is kept as text so that a missing or non-numeric book count
/// re-renders the form with a reason, like every other bad input, instead
/// of bouncing off the extractor as a bare 422.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorForm {
    pub email: String,
    pub username: String,
    pub nb_books: String,
}

impl AuthorForm {
    /// Bind the raw fields into a submission, or report why they don't bind.
    pub fn to_submission(&self) -> Result<AuthorSubmission, String> {
        let nb_books = self
            .nb_books
            .trim()
            .parse::<i64>()
            .map_err(|_| "book count must be a whole number".to_string())?;
        Ok(AuthorSubmission {
            email: self.email.clone(),
            username: self.username.clone(),
            nb_books,
        })
    }
}

/// Form state: current field values plus an optional correction reason.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub email: String,
    pub username: String,
    pub nb_books: String,
    pub error: Option<String>,
}

impl FormView {
    pub fn from_author(author: &Author, error: Option<String>) -> Self {
        Self {
            email: author.email.clone(),
            username: author.username.clone(),
            nb_books: author.nb_books.to_string(),
            error,
        }
    }

    /// Echo back whatever was typed, including an unparseable count.
    pub fn from_form(form: &AuthorForm, error: Option<String>) -> Self {
        Self {
            email: form.email.clone(),
            username: form.username.clone(),
            nb_books: form.nb_books.clone(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_binds_a_numeric_count() {
        let form = AuthorForm {
            email: "a@b.com".to_string(),
            username: "bob".to_string(),
            nb_books: " 3 ".to_string(),
        };
        let submission = form.to_submission().unwrap();
        assert_eq!(submission.nb_books, 3);
        assert_eq!(submission.username, "bob");
    }

    #[test]
    fn form_reports_an_unparseable_count() {
        for raw in ["", "abc", "1.5"] {
            let form = AuthorForm {
                nb_books: raw.to_string(),
                ..AuthorForm::default()
            };
            assert_eq!(
                form.to_submission().unwrap_err(),
                "book count must be a whole number"
            );
        }
    }

    #[test]
    fn form_view_echoes_raw_input() {
        let form = AuthorForm {
            email: "a@b.com".to_string(),
            username: "bob".to_string(),
            nb_books: "abc".to_string(),
        };
        let view = FormView::from_form(&form, Some("book count must be a whole number".to_string()));
        assert_eq!(view.nb_books, "abc");
        assert!(view.error.is_some());
    }
}
