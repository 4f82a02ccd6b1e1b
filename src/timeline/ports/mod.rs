//! Collaborator ports used by handlers and services.
//!
//! Every port has a no-op adapter so a partially wired chat screen still
//! renders.

pub mod link_opener;
pub mod navigator;
pub mod translator;

pub use link_opener::{LinkOpenError, LinkOpener};
pub use navigator::Navigator;
pub use translator::Translator;
