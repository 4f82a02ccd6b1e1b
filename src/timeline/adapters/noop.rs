//! Collaborators used when the host has not configured one.
//!
//! Each logs a warning when invoked and otherwise does nothing.

use async_trait::async_trait;
use tracing::warn;

use crate::timeline::{
    domain::NavigationTarget,
    ports::{LinkOpenError, LinkOpener, Navigator, Translator},
};

/// Navigator that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, target: &NavigationTarget) {
        warn!(?target, "navigation requested but no navigator is configured");
    }
}

/// Link opener that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLinkOpener;

#[async_trait]
impl LinkOpener for NoopLinkOpener {
    async fn open(&self, target: &str) -> Result<(), LinkOpenError> {
        warn!(link = target, "link opened but no link opener is configured");
        Ok(())
    }
}

/// Translator that returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_owned()
    }
}
