//! In-memory collaborators for tests and embedding hosts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::timeline::{
    domain::NavigationTarget,
    ports::{LinkOpenError, LinkOpener, Navigator, Translator},
};

/// Navigator that records every target it is asked to open.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<NavigationTarget>>>,
}

impl RecordingNavigator {
    /// Creates an empty navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the targets opened so far, in order.
    #[must_use]
    pub fn visited(&self) -> Vec<NavigationTarget> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &NavigationTarget) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.clone());
    }
}

/// Link opener that records every target it is asked to open.
#[derive(Debug, Clone, Default)]
pub struct RecordingLinkOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingLinkOpener {
    /// Creates an empty link opener.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the targets opened so far, in order.
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LinkOpener for RecordingLinkOpener {
    async fn open(&self, target: &str) -> Result<(), LinkOpenError> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(target.to_owned());
        Ok(())
    }
}

/// Translator backed by a fixed table; unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    strings: HashMap<String, String>,
}

impl StaticTranslator {
    /// Creates a translator from key/value pairs.
    #[must_use]
    pub fn new<K, V>(strings: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            strings: strings
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_owned())
    }
}
