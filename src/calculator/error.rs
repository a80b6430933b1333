//! Error types for calculator operations.

use thiserror::Error;

/// Errors surfaced by [`Calculator`](super::Calculator) calls.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid params: element {index} is a {found}, expected a number")]
    InvalidParams { index: usize, found: &'static str },

    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    #[error("Operation not found: {name}")]
    OperationNotFound { name: String },

    #[error("Invalid timestamp format '{format}': {reason}")]
    InvalidTimestampFormat {
        format: String,
        reason: &'static str,
    },
}

impl CalcError {
    pub fn invalid_operation(reason: impl Into<String>) -> Self {
        CalcError::InvalidOperation {
            reason: reason.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        CalcError::OperationNotFound { name: name.into() }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
