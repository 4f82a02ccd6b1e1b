//! Domain model for overlay bundles and their wire encodings.

mod branding;
mod bundle;
mod error;
mod wire;

pub use branding::{BrandingField, BrandingOverlay};
pub use bundle::{CaptureBase, LabelOverlay, MetaOverlay, OverlayBundle};
pub use error::OverlayError;
pub use wire::{OverlayKind, extract_embedded_overlay};
