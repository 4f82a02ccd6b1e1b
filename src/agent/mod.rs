//! Port onto the external credential-exchange agent.
//!
//! The agent owns connections, credential and proof exchanges, and basic
//! messages. This crate only invokes it; nothing here reimplements the
//! protocol. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
