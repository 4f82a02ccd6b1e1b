//! Domain types for the chat timeline.
//!
//! This module contains pure types with no infrastructure dependencies.

mod archetype;
mod card;
mod error;
mod handler_type;
mod ids;
mod menu;
mod message;
mod record;
mod spans;

pub use archetype::{Archetype, ArchetypeRules, CardFieldRole, classify_archetype};
pub use card::{CardField, CredentialCard, ProofCard, ProofStatus};
pub use error::DomainError;
pub use handler_type::HandlerType;
pub use ids::RecordId;
pub use menu::{DisplayItem, MENU_REQUEST_TOKEN, MenuPayload, WorkflowAction, is_json_payload};
pub use message::{MessageBody, MessageRole, NavigationTarget, NormalizedMessage, RenderedView};
pub use record::{
    BasicMessagePayload, CredentialAttribute, CredentialPayload, CredentialState, ExchangeRecord,
    OtherPayload, ProofPayload, ProofState, RecordPayload, RecordRole,
};
pub use spans::{LinkKind, TextSpan, linkify};
