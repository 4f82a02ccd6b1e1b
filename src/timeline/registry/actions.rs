//! Chat action menu entries contributed by pluggable factories.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::agent::{
    domain::ConnectionId,
    ports::{AgentError, ExchangeAgent},
};
use crate::config::ChatFeatures;
use crate::timeline::domain::{MENU_REQUEST_TOKEN, NavigationTarget};
use crate::timeline::handlers::HandlerContext;
use crate::timeline::ports::{Navigator, Translator};

/// Errors raised while running a chat action.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    /// The agent rejected the request.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Collaborators available to action factories and handlers.
#[derive(Clone)]
pub struct ActionContext {
    /// Exchange agent, if configured.
    pub agent: Option<Arc<dyn ExchangeAgent>>,
    /// Connection the chat screen shows, if any.
    pub connection_id: Option<ConnectionId>,
    /// Screen navigation.
    pub navigator: Arc<dyn Navigator>,
    /// Localisation.
    pub translator: Arc<dyn Translator>,
    /// Feature toggles.
    pub features: ChatFeatures,
}

impl fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("has_agent", &self.agent.is_some())
            .field("connection_id", &self.connection_id)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

impl ActionContext {
    /// Builds an action context from a handler context.
    #[must_use]
    pub fn from_handler_context(context: &HandlerContext, features: ChatFeatures) -> Self {
        Self {
            agent: context.agent().cloned(),
            connection_id: context.connection_id().cloned(),
            navigator: context.navigator_handle(),
            translator: context.translator_handle(),
            features,
        }
    }
}

/// Runs a chat action.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Runs the action.
    async fn invoke(&self, context: &ActionContext) -> Result<(), ActionError>;
}

/// An entry in the chat action menu.
#[derive(Clone)]
pub struct ChatAction {
    /// Stable identifier, used for de-duplication.
    pub id: String,
    /// Localised label.
    pub label: String,
    /// Icon name understood by the host.
    pub icon: String,
    /// Behaviour run when the entry is chosen.
    pub handler: Arc<dyn ActionHandler>,
}

impl fmt::Debug for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

impl ChatAction {
    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns the handler's error.
    pub async fn invoke(&self, context: &ActionContext) -> Result<(), ActionError> {
        self.handler.invoke(context).await
    }
}

/// Contributes at most one entry to the chat action menu.
pub trait ActionFactory: Send + Sync {
    /// Builds the entry, or `None` when it does not apply to `context`.
    fn build(&self, context: &ActionContext) -> Option<ChatAction>;
}

/// Ordered list of action factories.
#[derive(Default)]
pub struct ActionRegistry {
    factories: Vec<Arc<dyn ActionFactory>>,
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("factories", &self.factories.len())
            .finish()
    }
}

impl ActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in factories: menu request,
    /// then connection info.
    #[must_use]
    pub fn with_default_factories() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MenuRequestActionFactory));
        registry.register(Arc::new(ConnectionInfoActionFactory));
        registry
    }

    /// Appends a factory.
    pub fn register(&mut self, factory: Arc<dyn ActionFactory>) {
        self.factories.push(factory);
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when no factory is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds the action menu for `context`.
    ///
    /// Entries keep factory registration order. When two factories produce
    /// the same identifier, the first one wins.
    #[must_use]
    pub fn actions(&self, context: &ActionContext) -> Vec<ChatAction> {
        let mut seen = HashSet::new();
        self.factories
            .iter()
            .filter_map(|factory| factory.build(context))
            .filter(|action| {
                let fresh = seen.insert(action.id.clone());
                if !fresh {
                    debug!(action_id = %action.id, "dropping duplicate chat action");
                }
                fresh
            })
            .collect()
    }
}

/// Identifier of the built-in menu request action.
pub const MENU_REQUEST_ACTION_ID: &str = "workflow.menu";

/// Identifier of the built-in connection info action.
pub const CONNECTION_INFO_ACTION_ID: &str = "connection.info";

/// Offers "show menu", which sends the menu request sentinel to the peer.
///
/// Enabled by [`ChatFeatures::show_menu_button`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuRequestActionFactory;

impl ActionFactory for MenuRequestActionFactory {
    fn build(&self, context: &ActionContext) -> Option<ChatAction> {
        if !context.features.show_menu_button {
            return None;
        }
        Some(ChatAction {
            id: MENU_REQUEST_ACTION_ID.to_owned(),
            label: context.translator.translate("Chat.ShowMenu"),
            icon: "menu".to_owned(),
            handler: Arc::new(RequestMenu),
        })
    }
}

struct RequestMenu;

#[async_trait]
impl ActionHandler for RequestMenu {
    async fn invoke(&self, context: &ActionContext) -> Result<(), ActionError> {
        let (Some(agent), Some(connection_id)) = (&context.agent, &context.connection_id) else {
            warn!("menu requested without an agent and connection");
            return Ok(());
        };
        agent.send_message(connection_id, MENU_REQUEST_TOKEN).await?;
        Ok(())
    }
}

/// Offers "connection info", which opens the connection details screen.
///
/// Enabled by [`ChatFeatures::show_info_button`]; omitted when the chat has
/// no connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionInfoActionFactory;

impl ActionFactory for ConnectionInfoActionFactory {
    fn build(&self, context: &ActionContext) -> Option<ChatAction> {
        if !context.features.show_info_button {
            return None;
        }
        let connection_id = context.connection_id.clone()?;
        Some(ChatAction {
            id: CONNECTION_INFO_ACTION_ID.to_owned(),
            label: context.translator.translate("Chat.ConnectionInfo"),
            icon: "information".to_owned(),
            handler: Arc::new(OpenConnectionInfo { connection_id }),
        })
    }
}

struct OpenConnectionInfo {
    connection_id: ConnectionId,
}

#[async_trait]
impl ActionHandler for OpenConnectionInfo {
    async fn invoke(&self, context: &ActionContext) -> Result<(), ActionError> {
        context.navigator.navigate(&NavigationTarget::ConnectionInfo {
            connection_id: self.connection_id.clone(),
        });
        Ok(())
    }
}
