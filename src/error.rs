//! Error type shared by the validators and the record store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Field;

#[derive(Debug, Error)]
pub enum RecordError {
    /// One or more form fields failed their predicate. Raised before the
    /// store is touched.
    #[error("invalid input: {}", join_fields(.0))]
    Validation(Vec<Field>),

    #[error("a student with UID {0} already exists")]
    DuplicateKey(i64),

    #[error("student {0} not found")]
    NotFound(i64),

    #[error("could not open the student store at {}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not create data directory {}", .path.display())]
    DataDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl RecordError {
    /// Fields reported by a validation failure, empty for every other kind.
    pub fn invalid_fields(&self) -> &[Field] {
        match self {
            RecordError::Validation(fields) => fields,
            _ => &[],
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = RecordError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = RecordError::Validation(vec![Field::Contact, Field::Age]);
        assert_eq!(err.to_string(), "invalid input: Contact, Age");
        assert_eq!(err.invalid_fields(), &[Field::Contact, Field::Age]);
    }

    #[test]
    fn non_validation_errors_have_no_fields() {
        let err = RecordError::NotFound(7);
        assert_eq!(err.to_string(), "student 7 not found");
        assert!(err.invalid_fields().is_empty());
    }
}
