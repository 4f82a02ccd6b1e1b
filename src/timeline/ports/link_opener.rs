//! Platform link opener port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Hands `https:` and `mailto:` targets to the platform.
#[async_trait]
pub trait LinkOpener: Send + Sync {
    /// Opens `target`.
    async fn open(&self, target: &str) -> Result<(), LinkOpenError>;
}

/// Errors returned by link opener adapters.
#[derive(Debug, Clone, Error)]
pub enum LinkOpenError {
    /// No application can open the target.
    #[error("no handler for link: {0}")]
    Unsupported(String),

    /// Platform failure.
    #[error("failed to open link: {0}")]
    Platform(Arc<dyn std::error::Error + Send + Sync>),
}

impl LinkOpenError {
    /// Wraps a platform error.
    pub fn platform(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Platform(Arc::new(err))
    }
}
