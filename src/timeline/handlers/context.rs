//! Collaborators shared by every handler.

use std::fmt;
use std::sync::Arc;

use crate::agent::{domain::ConnectionId, ports::ExchangeAgent};
use crate::config::ChatConfig;
use crate::timeline::adapters::noop::{KeyTranslator, NoopLinkOpener, NoopNavigator};
use crate::timeline::domain::ArchetypeRules;
use crate::timeline::ports::{LinkOpener, Navigator, Translator};
use crate::timeline::registry::RendererRegistry;

const DEFAULT_LANGUAGE: &str = "en";

/// Collaborators injected into a handler registry.
///
/// The context is supplied once, through
/// [`HandlerRegistry::configure`](crate::timeline::registry::HandlerRegistry::configure).
/// Every collaborator defaults to a no-op, so a partially configured chat
/// screen still renders.
#[derive(Clone)]
pub struct HandlerContext {
    agent: Option<Arc<dyn ExchangeAgent>>,
    connection_id: Option<ConnectionId>,
    navigator: Arc<dyn Navigator>,
    link_opener: Arc<dyn LinkOpener>,
    translator: Arc<dyn Translator>,
    renderers: Arc<RendererRegistry>,
    archetypes: ArchetypeRules,
    language: String,
}

impl Default for HandlerContext {
    fn default() -> Self {
        Self {
            agent: None,
            connection_id: None,
            navigator: Arc::new(NoopNavigator),
            link_opener: Arc::new(NoopLinkOpener),
            translator: Arc::new(KeyTranslator),
            renderers: Arc::new(RendererRegistry::new()),
            archetypes: ArchetypeRules::default(),
            language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

impl fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("has_agent", &self.agent.is_some())
            .field("connection_id", &self.connection_id)
            .field("renderers", &self.renderers)
            .field("archetypes", &self.archetypes)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl HandlerContext {
    /// Creates a context with no-op collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context carrying the archetype rules and language from
    /// `config`.
    #[must_use]
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            archetypes: config.archetypes.clone(),
            language: config.language.clone(),
            ..Self::default()
        }
    }

    /// Sets the exchange agent.
    #[must_use]
    pub fn with_agent(mut self, agent: Arc<dyn ExchangeAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Sets the connection the chat screen shows.
    #[must_use]
    pub fn with_connection(mut self, connection_id: ConnectionId) -> Self {
        self.connection_id = Some(connection_id);
        self
    }

    /// Sets the navigator.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Sets the link opener.
    #[must_use]
    pub fn with_link_opener(mut self, link_opener: Arc<dyn LinkOpener>) -> Self {
        self.link_opener = link_opener;
        self
    }

    /// Sets the translator.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Sets the renderer registry.
    #[must_use]
    pub fn with_renderers(mut self, renderers: Arc<RendererRegistry>) -> Self {
        self.renderers = renderers;
        self
    }

    /// Sets the archetype rules.
    #[must_use]
    pub fn with_archetypes(mut self, archetypes: ArchetypeRules) -> Self {
        self.archetypes = archetypes;
        self
    }

    /// Sets the language used for overlay resolution.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Returns the exchange agent, if configured.
    #[must_use]
    pub fn agent(&self) -> Option<&Arc<dyn ExchangeAgent>> {
        self.agent.as_ref()
    }

    /// Returns the connection the chat screen shows, if configured.
    #[must_use]
    pub const fn connection_id(&self) -> Option<&ConnectionId> {
        self.connection_id.as_ref()
    }

    /// Returns the navigator.
    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Returns a shared handle to the navigator.
    #[must_use]
    pub fn navigator_handle(&self) -> Arc<dyn Navigator> {
        Arc::clone(&self.navigator)
    }

    /// Returns the link opener.
    #[must_use]
    pub fn link_opener(&self) -> &dyn LinkOpener {
        self.link_opener.as_ref()
    }

    /// Returns the translator.
    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    /// Returns a shared handle to the translator.
    #[must_use]
    pub fn translator_handle(&self) -> Arc<dyn Translator> {
        Arc::clone(&self.translator)
    }

    /// Translates `key`.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    /// Returns the renderer registry.
    #[must_use]
    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    /// Returns the archetype rules.
    #[must_use]
    pub const fn archetypes(&self) -> &ArchetypeRules {
        &self.archetypes
    }

    /// Returns the language used for overlay resolution.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}
