//! Overlay bundles: descriptive and branding metadata for credential
//! subjects.
//!
//! Overlays describe how to label and brand a subject (names,
//! descriptions, colours, images) in a given language. Remote issuers
//! publish them in a descriptive `snake_case` encoding; the crate works with
//! a compact `camelCase` encoding. The module follows hexagonal architecture:
//!
//! - Domain types and wire conversion in [`domain`]
//! - The bundled catalog port in [`ports`]
//! - Catalog adapters in [`adapters`]
//! - Layered resolution in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
