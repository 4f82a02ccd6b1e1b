//! Timeline services: assembly and menu workflow actions.

mod menu_actions;
mod timeline;

pub use menu_actions::{MenuActionError, MenuActionOutcome, MenuActionService, UserAlert};
pub use timeline::{TimelineReport, TimelineService};
