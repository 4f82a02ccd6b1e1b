//! Static, in-memory overlay catalog.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::domain::SubjectId;
use crate::overlay::{
    domain::{OverlayBundle, OverlayError},
    ports::OverlayCatalog,
};

/// Overlay catalog backed by bundles loaded at startup.
///
/// Bundles are stored in the compact encoding. A subject may carry one
/// bundle per language; lookups fall back to the first bundle registered
/// for the subject when the requested language is missing.
#[derive(Debug, Clone, Default)]
pub struct StaticOverlayCatalog {
    bundles: HashMap<SubjectId, Vec<Arc<OverlayBundle>>>,
}

impl StaticOverlayCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON array of compact bundles.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidJson`] when the document does not
    /// decode into bundles.
    pub fn from_json(document: &str) -> Result<Self, OverlayError> {
        let bundles: Vec<OverlayBundle> = serde_json::from_str(document)?;
        Ok(bundles.into_iter().fold(Self::new(), Self::with_bundle))
    }

    /// Adds a bundle to the catalog.
    #[must_use]
    pub fn with_bundle(mut self, bundle: OverlayBundle) -> Self {
        self.insert(bundle);
        self
    }

    /// Adds a bundle to the catalog.
    pub fn insert(&mut self, bundle: OverlayBundle) {
        self.bundles
            .entry(bundle.subject_id().clone())
            .or_default()
            .push(Arc::new(bundle));
    }

    /// Returns the number of subjects with at least one bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Returns `true` when the catalog holds no bundles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl OverlayCatalog for StaticOverlayCatalog {
    fn lookup(&self, subject_id: &SubjectId, language: &str) -> Option<Arc<OverlayBundle>> {
        let candidates = self.bundles.get(subject_id)?;
        candidates
            .iter()
            .find(|bundle| bundle.language() == language)
            .or_else(|| candidates.first())
            .cloned()
    }
}
