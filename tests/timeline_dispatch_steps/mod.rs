//! Step definitions for timeline dispatch scenarios.

mod given;
mod then;
mod when;
pub mod world;
