//! In-memory agent for tests and demonstrations.
//!
//! The adapter keeps connections, invitations, and subject definitions in
//! process memory and records every message sent through it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use uuid::Uuid;

use crate::agent::{
    domain::{
        ConnectionId, ConnectionRecord, ConnectionState, InvitationId, ParsedInvitation,
        SubjectDefinition, SubjectId,
    },
    ports::{AgentError, AgentResult, ExchangeAgent},
};

/// A message recorded by [`InMemoryAgent::send_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Connection the message was sent on.
    pub connection_id: ConnectionId,
    /// Message body.
    pub text: String,
    /// When the agent accepted the message.
    pub sent_at: DateTime<Utc>,
}

/// Thread-safe in-memory agent.
pub struct InMemoryAgent<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryAgentState>>,
    definition_fetches: Arc<AtomicUsize>,
    fetch_delay: Option<Duration>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryAgent<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            definition_fetches: Arc::clone(&self.definition_fetches),
            fetch_delay: self.fetch_delay,
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryAgentState {
    connections: Vec<ConnectionRecord>,
    invitations: HashMap<String, ParsedInvitation>,
    definitions: HashMap<SubjectId, SubjectDefinition>,
    sent: Vec<SentMessage>,
}

impl InMemoryAgent<DefaultClock> {
    /// Creates an empty agent using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryAgent<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryAgent<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty agent stamping sent messages with `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryAgentState::default())),
            definition_fetches: Arc::new(AtomicUsize::new(0)),
            fetch_delay: None,
            clock: Arc::new(clock),
        }
    }

    /// Delays every subject definition fetch, widening the window in which
    /// concurrent resolves overlap.
    #[must_use]
    pub const fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Registers an existing connection.
    pub fn add_connection(&self, connection: ConnectionRecord) {
        self.write_state().connections.push(connection);
    }

    /// Makes `link` decode to `invitation`.
    pub fn add_invitation(&self, link: impl Into<String>, invitation: ParsedInvitation) {
        self.write_state().invitations.insert(link.into(), invitation);
    }

    /// Publishes a subject definition.
    pub fn add_definition(&self, definition: SubjectDefinition) {
        self.write_state()
            .definitions
            .insert(definition.id().clone(), definition);
    }

    /// Returns every message sent so far, in send order.
    #[must_use]
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.read_state().sent.clone()
    }

    /// Returns every known connection.
    #[must_use]
    pub fn connections(&self) -> Vec<ConnectionRecord> {
        self.read_state().connections.clone()
    }

    /// Returns how many subject definitions have been fetched.
    #[must_use]
    pub fn definition_fetch_count(&self) -> usize {
        self.definition_fetches.load(Ordering::SeqCst)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, InMemoryAgentState> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, InMemoryAgentState> {
        self.state
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl<C> ExchangeAgent for InMemoryAgent<C>
where
    C: Clock + Send + Sync,
{
    async fn send_message(&self, connection_id: &ConnectionId, text: &str) -> AgentResult<()> {
        let mut state = self.write_state();
        if !state.connections.iter().any(|c| c.id() == connection_id) {
            return Err(AgentError::ConnectionNotFound(connection_id.clone()));
        }
        state.sent.push(SentMessage {
            connection_id: connection_id.clone(),
            text: text.to_owned(),
            sent_at: self.clock.utc(),
        });
        Ok(())
    }

    async fn parse_invitation(&self, link: &str) -> AgentResult<ParsedInvitation> {
        self.read_state()
            .invitations
            .get(link)
            .cloned()
            .ok_or_else(|| AgentError::InvalidInvitation(link.to_owned()))
    }

    async fn find_by_received_invitation_id(
        &self,
        invitation_id: &InvitationId,
    ) -> AgentResult<Option<ConnectionRecord>> {
        Ok(self
            .read_state()
            .connections
            .iter()
            .find(|c| c.invitation_id() == Some(invitation_id))
            .cloned())
    }

    async fn find_connections_by_invitation(
        &self,
        invitation_id: &InvitationId,
    ) -> AgentResult<Vec<ConnectionRecord>> {
        Ok(self
            .read_state()
            .connections
            .iter()
            .filter(|c| c.invitation_id() == Some(invitation_id))
            .cloned()
            .collect())
    }

    async fn receive_invitation(
        &self,
        invitation: &ParsedInvitation,
    ) -> AgentResult<ConnectionRecord> {
        let connection = ConnectionRecord::new(
            ConnectionId::new(Uuid::new_v4().to_string()),
            Some(invitation.id().clone()),
            ConnectionState::Completed,
        );
        self.write_state().connections.push(connection.clone());
        Ok(connection)
    }

    async fn get_subject_definition(
        &self,
        subject_id: &SubjectId,
    ) -> AgentResult<SubjectDefinition> {
        self.definition_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        self.read_state()
            .definitions
            .get(subject_id)
            .cloned()
            .ok_or_else(|| AgentError::SubjectNotFound(subject_id.clone()))
    }
}
