//! Chat timeline: record classification, normalization, and rendering
//! registries.
//!
//! Records produced by the credential-exchange agent arrive with no
//! out-of-band type discriminator beyond their payload kind. An ordered
//! [`registry::HandlerRegistry`] assigns each record to the first handler
//! that accepts it; the handler projects the record into a
//! [`domain::NormalizedMessage`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Collaborator ports (navigation, translation, link opening) in [`ports`]
//! - No-op and in-memory collaborators in [`adapters`]
//! - The handler contract and built-in handlers in [`handlers`]
//! - Handler, renderer, and action registries in [`registry`]
//! - Timeline assembly and menu workflow actions in [`services`]

pub mod adapters;
pub mod domain;
pub mod handlers;
pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
mod tests;
