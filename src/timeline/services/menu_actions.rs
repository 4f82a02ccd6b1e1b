//! Workflow actions triggered from a peer's menu.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::agent::{
    domain::{ConnectionId, ConnectionRecord, ConnectionState, ParsedInvitation},
    ports::{AgentError, ExchangeAgent},
};
use crate::timeline::domain::{
    DisplayItem, MENU_REQUEST_TOKEN, MenuPayload, NavigationTarget, WorkflowAction,
};
use crate::timeline::handlers::HandlerContext;

const CONNECT_FAILED_TITLE: &str = "Chat.ConnectionFailedTitle";
const CONNECT_FAILED_BODY: &str = "Chat.ConnectionFailedMessage";
const ACTION_FAILED_TITLE: &str = "Chat.ActionFailedTitle";
const ACTION_FAILED_BODY: &str = "Chat.ActionFailedMessage";

/// Errors raised by menu workflow actions.
#[derive(Debug, Clone, Error)]
pub enum MenuActionError {
    /// The agent rejected the request.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The workflow action could not be encoded.
    #[error("failed to encode workflow action: {0}")]
    Encode(Arc<serde_json::Error>),

    /// The menu has no button at the given position.
    #[error("menu item {0} is not a button")]
    NoSuchButton(usize),
}

impl From<serde_json::Error> for MenuActionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(Arc::new(err))
    }
}

/// Result type for menu workflow actions.
pub type MenuActionResult<T> = Result<T, MenuActionError>;

/// What a menu action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuActionOutcome {
    /// A message was sent to the peer.
    Sent,
    /// A connection was reused or created, and the chat navigated to it.
    Connected(ConnectionId),
    /// Nothing happened because the agent or connection is not configured.
    Skipped,
}

/// A translated alert shown when a user-initiated action fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {body}")]
pub struct UserAlert {
    /// Alert title.
    pub title: String,
    /// Alert body.
    pub body: String,
}

/// Sends workflow actions and menu requests on the chat's connection.
#[derive(Debug, Clone)]
pub struct MenuActionService {
    context: HandlerContext,
}

impl MenuActionService {
    /// Creates a service over the chat's collaborators.
    #[must_use]
    pub const fn new(context: HandlerContext) -> Self {
        Self { context }
    }

    fn agent_and_connection(&self) -> Option<(&Arc<dyn ExchangeAgent>, &ConnectionId)> {
        let agent = self.context.agent();
        let connection_id = self.context.connection_id();
        if agent.is_none() || connection_id.is_none() {
            warn!(
                has_agent = agent.is_some(),
                has_connection = connection_id.is_some(),
                "menu action skipped; agent or connection not configured"
            );
        }
        agent.zip(connection_id)
    }

    /// Sends `{workflowID, actionID, data}` to the peer.
    ///
    /// # Errors
    ///
    /// Returns [`MenuActionError::Encode`] when `data` cannot be encoded or
    /// [`MenuActionError::Agent`] when sending fails.
    pub async fn send_workflow_action(
        &self,
        workflow_id: &str,
        action_id: &str,
        data: Value,
    ) -> MenuActionResult<MenuActionOutcome> {
        let Some((agent, connection_id)) = self.agent_and_connection() else {
            return Ok(MenuActionOutcome::Skipped);
        };
        let body = WorkflowAction::new(workflow_id, action_id, data).to_message_body()?;
        agent.send_message(connection_id, &body).await?;
        debug!(workflow_id, action_id, "workflow action sent");
        Ok(MenuActionOutcome::Sent)
    }

    /// Asks the peer for its menu.
    ///
    /// # Errors
    ///
    /// Returns [`MenuActionError::Agent`] when sending fails.
    pub async fn request_menu(&self) -> MenuActionResult<MenuActionOutcome> {
        let Some((agent, connection_id)) = self.agent_and_connection() else {
            return Ok(MenuActionOutcome::Skipped);
        };
        agent.send_message(connection_id, MENU_REQUEST_TOKEN).await?;
        Ok(MenuActionOutcome::Sent)
    }

    /// Connects through `link`, reusing an existing connection when the
    /// invitation was already received, then navigates to the connection.
    ///
    /// # Errors
    ///
    /// Returns [`MenuActionError::Agent`] when the link cannot be parsed or
    /// the agent fails.
    pub async fn connect(&self, link: &str) -> MenuActionResult<MenuActionOutcome> {
        let Some(agent) = self.context.agent() else {
            warn!("connect skipped; agent not configured");
            return Ok(MenuActionOutcome::Skipped);
        };
        let invitation = agent.parse_invitation(link).await?;
        let connection = match find_existing(agent.as_ref(), &invitation).await? {
            Some(existing) => {
                debug!(connection_id = %existing.id(), "reusing connection for invitation");
                existing
            }
            None => agent.receive_invitation(&invitation).await?,
        };
        let connection_id = connection.id().clone();
        self.context.navigator().navigate(&NavigationTarget::Connection {
            connection_id: connection_id.clone(),
        });
        Ok(MenuActionOutcome::Connected(connection_id))
    }

    /// Presses the button at `index` of `menu`.
    ///
    /// A button carrying an invitation link connects through it; any other
    /// button sends its workflow action.
    ///
    /// # Errors
    ///
    /// Returns a translated [`UserAlert`] describing the failure.
    pub async fn press_button(
        &self,
        menu: &MenuPayload,
        index: usize,
    ) -> Result<MenuActionOutcome, UserAlert> {
        let Some(DisplayItem::Button {
            action_id,
            data,
            invitation_link,
            ..
        }) = menu.items().get(index)
        else {
            let err = MenuActionError::NoSuchButton(index);
            warn!(error = %err, "menu button press failed");
            return Err(self.missing_button_alert());
        };
        if let Some(link) = invitation_link {
            return self.connect(link).await.map_err(|err| {
                warn!(error = %err, "failed to connect from menu");
                self.alert(CONNECT_FAILED_TITLE, CONNECT_FAILED_BODY)
            });
        }
        self.send_workflow_action(menu.workflow_id(), action_id, data.clone())
            .await
            .map_err(|err| {
                warn!(error = %err, action_id = %action_id, "failed to send workflow action");
                self.alert(ACTION_FAILED_TITLE, ACTION_FAILED_BODY)
            })
    }

    /// Returns the alert shown when a pressed item is not a button.
    #[must_use]
    pub fn missing_button_alert(&self) -> UserAlert {
        self.alert(ACTION_FAILED_TITLE, ACTION_FAILED_BODY)
    }

    fn alert(&self, title_key: &str, body_key: &str) -> UserAlert {
        UserAlert {
            title: self.context.translate(title_key),
            body: self.context.translate(body_key),
        }
    }
}

async fn find_existing(
    agent: &dyn ExchangeAgent,
    invitation: &ParsedInvitation,
) -> Result<Option<ConnectionRecord>, AgentError> {
    if let Some(connection) = agent.find_by_received_invitation_id(invitation.id()).await? {
        return Ok(Some(connection));
    }
    let connections = agent.find_connections_by_invitation(invitation.id()).await?;
    Ok(connections
        .into_iter()
        .find(|connection| connection.state() != ConnectionState::Abandoned))
}
