//! Error types for timeline domain validation.

use thiserror::Error;

/// Errors returned while constructing timeline domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// The handler type tag is empty after trimming.
    #[error("handler type must not be empty")]
    EmptyHandlerType,

    /// The handler type tag contains characters outside `[a-z0-9_-]`.
    #[error("handler type '{0}' may only contain lowercase letters, digits, '-' and '_'")]
    InvalidHandlerType(String),

    /// The handler type tag exceeds the 64-character limit.
    #[error("handler type exceeds 64 character limit: {0}")]
    HandlerTypeTooLong(String),
}
