//! The normalized chat message produced by record handlers.

use super::{
    CredentialCard, ExchangeRecord, HandlerType, MenuPayload, ProofCard, RecordId, RecordRole,
    TextSpan,
};
use crate::agent::domain::ConnectionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which side of the chat a message is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// The local user.
    Local,
    /// The connected peer.
    Peer,
}

impl From<RecordRole> for MessageRole {
    fn from(role: RecordRole) -> Self {
        match role {
            RecordRole::Sent => Self::Local,
            RecordRole::Received => Self::Peer,
        }
    }
}

/// Screen opened when a message is tapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Review a credential offer.
    CredentialOffer {
        /// Credential exchange record.
        record_id: RecordId,
    },
    /// Show a held credential.
    CredentialDetails {
        /// Credential exchange record.
        record_id: RecordId,
    },
    /// Respond to a proof request.
    ProofRequest {
        /// Proof exchange record.
        record_id: RecordId,
    },
    /// Show a completed proof exchange.
    ProofDetails {
        /// Proof exchange record.
        record_id: RecordId,
    },
    /// Open the chat for a connection.
    Connection {
        /// Connection to open.
        connection_id: ConnectionId,
    },
    /// Show details about a connection.
    ConnectionInfo {
        /// Connection to describe.
        connection_id: ConnectionId,
    },
}

/// Output of a host-registered renderer.
///
/// The crate treats the view as opaque: `renderer` names the component the
/// host draws and `props` carries its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedView {
    /// Host component name.
    pub renderer: String,
    /// Component input.
    pub props: Value,
}

impl RenderedView {
    /// Creates a rendered view.
    #[must_use]
    pub fn new(renderer: impl Into<String>, props: Value) -> Self {
        Self {
            renderer: renderer.into(),
            props,
        }
    }
}

/// What the chat screen draws inside a message bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    /// Text with tappable links.
    Text(Vec<TextSpan>),
    /// A structured action menu.
    Menu(MenuPayload),
    /// The built-in credential card.
    Credential(CredentialCard),
    /// The built-in proof card.
    Proof(ProofCard),
    /// Output of a host-registered renderer.
    Custom(RenderedView),
}

/// A record projected into chat-message shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    id: RecordId,
    handler: HandlerType,
    text: String,
    label: String,
    body: MessageBody,
    created_at: DateTime<Utc>,
    role: MessageRole,
    detail: Option<NavigationTarget>,
}

impl NormalizedMessage {
    /// Creates a message for `record`, copying its identity, timestamp, and
    /// role.
    #[must_use]
    pub fn for_record(
        record: &ExchangeRecord,
        handler: HandlerType,
        text: impl Into<String>,
        body: MessageBody,
    ) -> Self {
        Self {
            id: record.id().clone(),
            handler,
            text: text.into(),
            label: String::new(),
            body,
            created_at: record.created_at(),
            role: record.role().into(),
            detail: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Overrides the role.
    #[must_use]
    pub const fn with_role(mut self, role: MessageRole) -> Self {
        self.role = role;
        self
    }

    /// Sets the screen opened when the message is tapped.
    #[must_use]
    pub fn with_detail(mut self, detail: Option<NavigationTarget>) -> Self {
        self.detail = detail;
        self
    }

    /// Returns the identifier of the source record.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the type of the handler that produced the message.
    #[must_use]
    pub const fn handler(&self) -> &HandlerType {
        &self.handler
    }

    /// Returns the plain-text rendering of the message.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the display label (for example "Credential offer").
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns what the bubble draws.
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Returns when the source record was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns which side the message is drawn on.
    #[must_use]
    pub const fn role(&self) -> MessageRole {
        self.role
    }

    /// Returns the screen opened when the message is tapped.
    #[must_use]
    pub const fn detail(&self) -> Option<&NavigationTarget> {
        self.detail.as_ref()
    }
}
