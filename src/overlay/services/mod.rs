//! Overlay resolution services.

mod resolver;

pub use resolver::{CacheKeying, OverlayResolver, ResolverConfig};
