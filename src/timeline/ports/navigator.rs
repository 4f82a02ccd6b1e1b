//! Navigation port.

use crate::timeline::domain::NavigationTarget;

/// Opens screens owned by the host application.
pub trait Navigator: Send + Sync {
    /// Navigates to `target`.
    fn navigate(&self, target: &NavigationTarget);
}
