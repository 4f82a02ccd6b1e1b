//! Validated handler type tag.

use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TYPE_LENGTH: usize = 64;

/// Unique, human-stable tag identifying a record handler (e.g.
/// `basic_message`, `action_menu`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerType(String);

impl HandlerType {
    /// Creates a validated handler type.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyHandlerType`] when the value is empty after
    /// trimming, [`DomainError::InvalidHandlerType`] when it contains other
    /// characters, or [`DomainError::HandlerTypeTooLong`] when it exceeds 64
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::EmptyHandlerType);
        }

        if normalized.len() > MAX_TYPE_LENGTH {
            return Err(DomainError::HandlerTypeTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !is_valid {
            return Err(DomainError::InvalidHandlerType(raw));
        }

        Ok(Self(normalized))
    }

    /// Creates a handler type from a tag known to be valid at compile time.
    pub(crate) fn builtin(tag: &'static str) -> Self {
        Self(tag.to_owned())
    }

    /// Returns the handler type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HandlerType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
