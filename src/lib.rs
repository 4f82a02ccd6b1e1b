//! Exchange chat: workflow dispatch and rendering registry for
//! credential-exchange chat timelines.
//!
//! This crate classifies records produced by an external credential-exchange
//! agent (text messages, credential offers, proof requests, structured action
//! menus), projects each into a normalized chat message, and resolves the
//! branding metadata needed to present a record's subject.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Trait interfaces for the agent, navigation, translation, and
//!   overlay catalogs
//! - **Adapters**: In-memory and no-op implementations of those ports
//! - **Services**: Orchestration of dispatch, overlay resolution, and menu
//!   workflow actions
//!
//! # Modules
//!
//! - [`agent`]: Port onto the external credential-exchange agent
//! - [`overlay`]: Overlay bundles, wire conversion, and layered resolution
//! - [`timeline`]: Record handlers, registries, and timeline assembly
//! - [`config`]: Host configuration for features, archetypes, and resolution

pub mod agent;
pub mod config;
pub mod overlay;
pub mod timeline;
