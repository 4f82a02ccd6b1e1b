//! Adapter implementations of the agent port.

pub mod memory;
