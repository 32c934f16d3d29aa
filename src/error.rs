//! Error types for field access and async loads.

use thiserror::Error;

/// Error type for field access operations on [`Row`](crate::model::Row).
#[derive(Debug, Clone, Error)]
pub enum FieldError {
    /// The requested attribute does not exist on the row.
    #[error("attribute '{field}' not found on row")]
    Missing { field: String },

    /// The attribute exists but has a different type than requested.
    #[error("attribute '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new missing attribute error.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error type for async load failures.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LoadError {
    /// Error message
    pub message: String,
}

impl LoadError {
    /// Create a new load error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for LoadError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
