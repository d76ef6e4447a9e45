use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The conflict raised when an ISBN is already held by another book,
    /// whether detected by the service lookup or by the unique index.
    pub fn duplicate_isbn(isbn: &str) -> Self {
        CoreError::Conflict(format!("A book with ISBN '{isbn}' already exists"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Book",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: Book with id 7");
    }

    #[test]
    fn duplicate_isbn_is_a_conflict() {
        let err = CoreError::duplicate_isbn("978-0140447934");
        assert_matches!(err, CoreError::Conflict(ref msg) if msg.contains("978-0140447934"));
    }
}
