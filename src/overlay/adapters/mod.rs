//! Adapter implementations of the overlay catalog port.

pub mod catalog;
