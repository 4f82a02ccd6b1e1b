//! Invitation and connection records returned by the agent.

use super::{ConnectionId, InvitationId};
use serde::{Deserialize, Serialize};

/// An invitation link decoded by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvitation {
    id: InvitationId,
    label: Option<String>,
    link: String,
}

impl ParsedInvitation {
    /// Creates a parsed invitation.
    #[must_use]
    pub fn new(id: InvitationId, label: Option<String>, link: impl Into<String>) -> Self {
        Self {
            id,
            label,
            link: link.into(),
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> &InvitationId {
        &self.id
    }

    /// Returns the inviter's advertised label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the raw link the invitation was parsed from.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }
}

/// Lifecycle state of a connection as reported by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// The invitation was accepted and the handshake is under way.
    Requested,
    /// The connection is usable.
    Completed,
    /// The connection was abandoned.
    Abandoned,
}

/// A connection known to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    id: ConnectionId,
    invitation_id: Option<InvitationId>,
    state: ConnectionState,
}

impl ConnectionRecord {
    /// Creates a connection record.
    #[must_use]
    pub const fn new(
        id: ConnectionId,
        invitation_id: Option<InvitationId>,
        state: ConnectionState,
    ) -> Self {
        Self {
            id,
            invitation_id,
            state,
        }
    }

    /// Returns the connection identifier.
    #[must_use]
    pub const fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Returns the invitation the connection was created from.
    #[must_use]
    pub const fn invitation_id(&self) -> Option<&InvitationId> {
        self.invitation_id.as_ref()
    }

    /// Returns the connection state.
    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        self.state
    }
}
