//! Book models and DTOs.

use booklib_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub year: i32,
    pub publisher: String,
    pub available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Book {
    /// Overwrite every caller-editable field from `input`.
    ///
    /// `id`, `available` and the timestamps are left untouched.
    pub fn apply(&mut self, input: CreateBook) {
        self.title = input.title;
        self.author = input.author;
        self.isbn = input.isbn;
        self.description = input.description;
        self.year = input.year;
        self.publisher = input.publisher;
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Payload for creating a book and for replacing one with `PUT`.
///
/// Missing fields deserialize to their zero value so that absence and
/// emptiness fail the same validation rule.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "isbn is required"))]
    pub isbn: String,
    pub description: String,
    #[validate(range(min = 1, message = "year is required"))]
    pub year: i32,
    pub publisher: String,
}

// ---------------------------------------------------------------------------
// Insert struct
// ---------------------------------------------------------------------------

/// Column values for a new `books` row. Storage assigns `id` and timestamps.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub year: i32,
    pub publisher: String,
    pub available: bool,
}

impl NewBook {
    /// A new, available book built from a validated payload.
    pub fn available(input: CreateBook) -> Self {
        Self {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            description: input.description,
            year: input.year,
            publisher: input.publisher,
            available: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn war_and_peace() -> CreateBook {
        CreateBook {
            title: "War and Peace".into(),
            author: "Leo Tolstoy".into(),
            isbn: "978-0140447934".into(),
            description: String::new(),
            year: 1869,
            publisher: "The Russian Messenger".into(),
        }
    }

    #[test]
    fn complete_payload_validates() {
        assert!(war_and_peace().validate().is_ok());
    }

    #[test]
    fn missing_fields_deserialize_to_zero_values_and_fail() {
        let input: CreateBook = serde_json::from_value(serde_json::json!({
            "title": "Anna Karenina",
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("author"));
        assert!(fields.contains_key("isbn"));
        assert!(fields.contains_key("year"));
        assert!(!fields.contains_key("title"));
    }

    #[test]
    fn zero_year_is_rejected() {
        let input = CreateBook {
            year: 0,
            ..war_and_peace()
        };
        assert!(input.validate().unwrap_err().field_errors().contains_key("year"));
    }

    #[test]
    fn new_books_start_available() {
        let book = NewBook::available(war_and_peace());
        assert!(book.available);
        assert_eq!(book.isbn, "978-0140447934");
    }
}
