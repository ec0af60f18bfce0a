//! Field-level validation for author candidates.

use bookshelf_core::{DomainError, DomainResult};

use crate::author::Author;

/// Validate a fully-bound author candidate before persistence.
///
/// Checks run in a fixed order and short-circuit on the first failure, so a
/// candidate violating several invariants always reports the first one.
/// Pure and deterministic; no I/O.
pub fn validate(author: &Author) -> DomainResult<()> {
    if !is_well_formed_email(&author.email) {
        return Err(DomainError::validation("invalid email format"));
    }
    if author.username.trim().is_empty() {
        return Err(DomainError::validation("username must not be empty"));
    }
    if author.username.len() > 255 {
        return Err(DomainError::validation("username too long (max 255)"));
    }
    if author.nb_books < 0 {
        return Err(DomainError::validation("book count cannot be negative"));
    }
    Ok(())
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace. Deliverability is not our problem.
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::AuthorSubmission;
    use proptest::prelude::*;

    fn candidate(email: &str, username: &str, nb_books: i64) -> Author {
        Author::seed().with_submission(&AuthorSubmission {
            email: email.to_string(),
            username: username.to_string(),
            nb_books,
        })
    }

    fn reason(author: &Author) -> String {
        match validate(author).unwrap_err() {
            DomainError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_well_formed_candidate() {
        assert!(validate(&candidate("a@b.com", "bob", 2)).is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        assert_eq!(reason(&candidate("not-an-email", "bob", 3)), "invalid email format");
        assert_eq!(reason(&candidate("", "bob", 0)), "invalid email format");
        assert_eq!(reason(&candidate("a@b", "bob", 0)), "invalid email format");
        assert_eq!(reason(&candidate("a@b..com", "bob", 0)), "invalid email format");
        assert_eq!(reason(&candidate("@b.com", "bob", 0)), "invalid email format");
        assert_eq!(reason(&candidate("a b@c.com", "bob", 0)), "invalid email format");
        assert_eq!(reason(&candidate("a@b@c.com", "bob", 0)), "invalid email format");
    }

    #[test]
    fn rejects_blank_username() {
        assert_eq!(reason(&candidate("a@b.com", "   ", 0)), "username must not be empty");
        assert_eq!(reason(&candidate("a@b.com", "", 0)), "username must not be empty");
    }

    #[test]
    fn rejects_overlong_username() {
        let long = "x".repeat(256);
        assert_eq!(reason(&candidate("a@b.com", &long, 0)), "username too long (max 255)");
        // Exactly at the limit is fine.
        let limit = "x".repeat(255);
        assert!(validate(&candidate("a@b.com", &limit, 0)).is_ok());
    }

    #[test]
    fn rejects_negative_book_count() {
        assert_eq!(reason(&candidate("a@b.com", "bob", -1)), "book count cannot be negative");
    }

    #[test]
    fn checks_run_in_fixed_order() {
        // Violates every invariant at once; the email check must win.
        let long = " ".repeat(300);
        assert_eq!(reason(&candidate("broken", &long, -5)), "invalid email format");
        // With a valid email, the empty-username check is next.
        assert_eq!(reason(&candidate("a@b.com", "   ", -5)), "username must not be empty");
        // Overlong but non-blank username beats the negative count.
        let long = "x".repeat(256);
        assert_eq!(reason(&candidate("a@b.com", &long, -5)), "username too long (max 255)");
    }

    #[test]
    fn verdict_is_stable_across_calls() {
        let bad = candidate("nope", "bob", 1);
        let good = candidate("a@b.com", "bob", 1);
        for _ in 0..3 {
            assert_eq!(validate(&bad), validate(&bad));
            assert!(validate(&good).is_ok());
        }
    }

    proptest! {
        #[test]
        fn simple_addresses_with_sane_fields_always_pass(
            local in "[a-z]{1,12}",
            domain in "[a-z]{1,12}",
            tld in "[a-z]{2,4}",
            username in "[a-zA-Z0-9_]{1,255}",
            nb_books in 0i64..10_000,
        ) {
            let email = format!("{local}@{domain}.{tld}");
            prop_assert!(validate(&candidate(&email, &username, nb_books)).is_ok());
        }

        #[test]
        fn negative_counts_never_pass(nb_books in i64::MIN..0) {
            prop_assert!(validate(&candidate("a@b.com", "bob", nb_books)).is_err());
        }
    }
}
