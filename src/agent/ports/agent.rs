//! Agent port: the operations the chat timeline invokes on the external
//! credential-exchange agent.

use crate::agent::domain::{
    ConnectionId, ConnectionRecord, InvitationId, ParsedInvitation, SubjectDefinition, SubjectId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Operations consumed from the credential-exchange agent.
///
/// Every operation may fail. Callers in this crate never let an
/// [`AgentError`] escape into rendering; they degrade or, for explicit user
/// actions, surface a translated alert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeAgent: Send + Sync {
    /// Sends a basic message on a connection.
    async fn send_message(&self, connection_id: &ConnectionId, text: &str) -> AgentResult<()>;

    /// Decodes an invitation link.
    async fn parse_invitation(&self, link: &str) -> AgentResult<ParsedInvitation>;

    /// Finds the connection created by receiving the given invitation.
    ///
    /// Returns `None` when the invitation has not been received yet.
    async fn find_by_received_invitation_id(
        &self,
        invitation_id: &InvitationId,
    ) -> AgentResult<Option<ConnectionRecord>>;

    /// Lists every connection created from the given invitation.
    async fn find_connections_by_invitation(
        &self,
        invitation_id: &InvitationId,
    ) -> AgentResult<Vec<ConnectionRecord>>;

    /// Accepts a parsed invitation, creating a connection.
    async fn receive_invitation(
        &self,
        invitation: &ParsedInvitation,
    ) -> AgentResult<ConnectionRecord>;

    /// Fetches the remote definition of a credential subject.
    async fn get_subject_definition(&self, subject_id: &SubjectId)
    -> AgentResult<SubjectDefinition>;
}

/// Errors returned by agent adapters.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// The connection does not exist.
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    /// The subject definition does not exist.
    #[error("subject definition not found: {0}")]
    SubjectNotFound(SubjectId),

    /// The invitation link could not be decoded.
    #[error("invalid invitation: {0}")]
    InvalidInvitation(String),

    /// Transport or agent-internal failure.
    #[error("agent error: {0}")]
    Agent(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentError {
    /// Wraps an agent-internal error.
    pub fn agent(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Agent(Arc::new(err))
    }
}
