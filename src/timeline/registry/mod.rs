//! Registries populated once at startup and shared across chat screens.
//!
//! - [`HandlerRegistry`]: ordered record handlers
//! - [`RendererRegistry`]: optional host renderers for cards and chrome
//! - [`ActionRegistry`]: factories for the chat action menu

mod actions;
mod handlers;
mod renderers;

pub use actions::{
    ActionContext, ActionError, ActionFactory, ActionHandler, ActionRegistry,
    CONNECTION_INFO_ACTION_ID, ChatAction, ConnectionInfoActionFactory, MENU_REQUEST_ACTION_ID,
    MenuRequestActionFactory,
};
pub use handlers::{Dispatch, HandlerRegistry};
pub use renderers::{
    AssemblerConfig, ChromeRenderer, RecordRenderer, RendererKind, RendererRegistry,
};
