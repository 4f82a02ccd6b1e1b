//! Bundled overlay catalog port.

use crate::agent::domain::SubjectId;
use crate::overlay::domain::OverlayBundle;
use std::sync::Arc;

/// Catalog of overlays shipped with the host application.
///
/// The resolver consults the catalog before its cache and before the agent,
/// so bundled branding always takes precedence over remote metadata.
pub trait OverlayCatalog: Send + Sync {
    /// Returns the bundled overlay for `subject_id`, preferring `language`.
    ///
    /// Returns `None` when the catalog has no entry for the subject.
    fn lookup(&self, subject_id: &SubjectId, language: &str) -> Option<Arc<OverlayBundle>>;
}
