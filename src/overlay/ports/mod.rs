//! Port contracts for overlay lookup.

pub mod catalog;

pub use catalog::OverlayCatalog;
