//! Exchange records as handed over by the agent store.
//!
//! Records are owned by the agent. The timeline reads them and never
//! mutates them.

use super::RecordId;
use crate::agent::domain::{ConnectionId, SubjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which side of the connection produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordRole {
    /// Produced by the local wallet.
    Sent,
    /// Produced by the peer.
    Received,
}

/// A persisted exchange event.
///
/// # Examples
///
/// ```
/// use exchange_chat::timeline::domain::{ExchangeRecord, RecordPayload, RecordRole};
/// use mockable::DefaultClock;
///
/// let record = ExchangeRecord::new(
///     RecordRole::Received,
///     RecordPayload::basic_message("hello"),
///     &DefaultClock,
/// );
/// assert_eq!(record.role(), RecordRole::Received);
/// assert_eq!(record.message_content(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRecord {
    id: RecordId,
    #[serde(default)]
    connection_id: Option<ConnectionId>,
    created_at: DateTime<Utc>,
    role: RecordRole,
    payload: RecordPayload,
}

impl ExchangeRecord {
    /// Creates a record with a fresh identifier stamped with the current time.
    #[must_use]
    pub fn new(role: RecordRole, payload: RecordPayload, clock: &impl Clock) -> Self {
        Self::from_parts(RecordId::generate(), clock.utc(), role, payload)
    }

    /// Reconstructs a record from stored parts.
    #[must_use]
    pub const fn from_parts(
        id: RecordId,
        created_at: DateTime<Utc>,
        role: RecordRole,
        payload: RecordPayload,
    ) -> Self {
        Self {
            id,
            connection_id: None,
            created_at,
            role,
            payload,
        }
    }

    /// Associates the record with a connection.
    #[must_use]
    pub fn with_connection(mut self, connection_id: ConnectionId) -> Self {
        self.connection_id = Some(connection_id);
        self
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Returns the connection the record belongs to, if any.
    #[must_use]
    pub const fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    /// Returns when the record was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns which side produced the record.
    #[must_use]
    pub const fn role(&self) -> RecordRole {
        self.role
    }

    /// Returns the type-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &RecordPayload {
        &self.payload
    }

    /// Returns the text of a basic message record.
    #[must_use]
    pub fn message_content(&self) -> Option<&str> {
        match &self.payload {
            RecordPayload::BasicMessage(message) => Some(&message.content),
            _ => None,
        }
    }

    /// Returns the credential subject the record refers to, if any.
    #[must_use]
    pub const fn subject_id(&self) -> Option<&SubjectId> {
        match &self.payload {
            RecordPayload::Credential(credential) => credential.subject_id.as_ref(),
            RecordPayload::Proof(proof) => proof.subject_id.as_ref(),
            RecordPayload::BasicMessage(_) | RecordPayload::Other(_) => None,
        }
    }
}

/// Type-specific record content, tagged by the agent-defined record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecordPayload {
    /// A basic text message.
    BasicMessage(BasicMessagePayload),
    /// A credential exchange.
    Credential(CredentialPayload),
    /// A proof exchange.
    Proof(ProofPayload),
    /// Any record kind this crate does not model.
    Other(OtherPayload),
}

impl RecordPayload {
    /// Creates a basic message payload.
    #[must_use]
    pub fn basic_message(content: impl Into<String>) -> Self {
        Self::BasicMessage(BasicMessagePayload {
            content: content.into(),
        })
    }
}

/// Basic message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMessagePayload {
    /// Raw message body.
    pub content: String,
}

/// Lifecycle state of a credential exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialState {
    /// The local wallet proposed a credential.
    ProposalSent,
    /// The peer offered a credential.
    OfferReceived,
    /// The local wallet offered a credential.
    OfferSent,
    /// The local wallet accepted an offer.
    RequestSent,
    /// The local wallet issued the credential.
    CredentialIssued,
    /// The credential arrived and awaits acknowledgement.
    CredentialReceived,
    /// The exchange completed.
    Done,
    /// The offer was declined.
    Declined,
    /// The exchange was abandoned.
    Abandoned,
}

/// A credential attribute name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialAttribute {
    /// Attribute name as declared by the issuer.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

impl CredentialAttribute {
    /// Creates an attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Credential exchange content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPayload {
    /// Exchange state.
    pub state: CredentialState,
    /// Credential subject (credential definition) identifier.
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    /// Offered or issued attributes.
    #[serde(default)]
    pub attributes: Vec<CredentialAttribute>,
}

/// Lifecycle state of a proof exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProofState {
    /// The peer requested a proof.
    RequestReceived,
    /// The local wallet requested a proof.
    RequestSent,
    /// The local wallet shared a presentation.
    PresentationSent,
    /// The peer shared a presentation.
    PresentationReceived,
    /// The exchange completed.
    Done,
    /// The request was declined.
    Declined,
    /// The exchange was abandoned.
    Abandoned,
}

/// Proof exchange content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    /// Exchange state.
    pub state: ProofState,
    /// Name of the proof request.
    #[serde(default)]
    pub name: Option<String>,
    /// Subject the request is restricted to, if any.
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    /// Requested attribute names.
    #[serde(default)]
    pub requested_attributes: Vec<String>,
    /// Verification outcome, once known.
    #[serde(default)]
    pub is_verified: Option<bool>,
}

/// Content of a record kind this crate does not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherPayload {
    /// Agent-defined record kind.
    pub kind: String,
    /// Raw record content.
    #[serde(default)]
    pub data: Value,
}
