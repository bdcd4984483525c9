//! Common error types for LickLog

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Common result type for LickLog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across LickLog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sort option outside the fixed set of strategies
    #[error("Invalid sort strategy: {0:?}")]
    InvalidSortStrategy(String),

    /// Lick draft rejected before reaching the catalog
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single rejected field of a lick draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the offending fields
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.field).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let mut err = ValidationError::default();
        err.push("name", "can't be blank");
        err.push("performance_rating", "must be between 1 and 5");

        assert_eq!(err.field_names(), vec!["name", "performance_rating"]);
        assert_eq!(
            err.to_string(),
            "name can't be blank; performance_rating must be between 1 and 5"
        );
    }

    #[test]
    fn test_invalid_sort_strategy_message() {
        let err = Error::InvalidSortStrategy("Genre".to_string());
        assert_eq!(err.to_string(), "Invalid sort strategy: \"Genre\"");
    }
}
