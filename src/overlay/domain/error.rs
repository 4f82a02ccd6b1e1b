//! Error types for overlay conversion and resolution.

use crate::agent::ports::AgentError;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while converting or resolving overlays.
///
/// The resolver never returns these to its callers; they are logged and the
/// caller receives no bundle.
#[derive(Debug, Clone, Error)]
pub enum OverlayError {
    /// The overlay payload is not a JSON object.
    #[error("overlay payload must be a JSON object")]
    NotAnObject,

    /// The subject metadata carries no embedded overlay.
    #[error("subject metadata has no embedded overlay")]
    MissingOverlay,

    /// An embedded overlay string was not valid JSON.
    #[error("embedded overlay is not valid JSON: {0}")]
    InvalidJson(Arc<serde_json::Error>),

    /// The agent failed to provide the subject definition.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(Arc::new(err))
    }
}
