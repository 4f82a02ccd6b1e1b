//! Host renderers for cards and chat chrome.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::domain::ConnectionId;
use crate::config::ChatFeatures;
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{ExchangeRecord, RenderedView};

/// Slot a host renderer fills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    /// Credential cards.
    Credential,
    /// Proof cards.
    Proof,
    /// The chat header.
    ChatHeader,
    /// The chat background.
    ChatBackground,
    /// A host-defined slot.
    Custom(String),
}

/// Renders a record in place of a built-in card.
pub trait RecordRenderer: Send + Sync {
    /// Renders `record`, using `subject` for labels and branding when
    /// available.
    fn render(&self, record: &ExchangeRecord, subject: Option<&OverlayBundle>) -> RenderedView;
}

/// Renders chat chrome (header, background) for a connection.
pub trait ChromeRenderer: Send + Sync {
    /// Renders the chrome for `connection_id`.
    fn render(&self, connection_id: Option<&ConnectionId>) -> RenderedView;
}

/// Optional host renderers keyed by [`RendererKind`].
///
/// Registering twice for one kind keeps both entries; lookups return the
/// first registered.
#[derive(Default)]
pub struct RendererRegistry {
    records: Vec<(RendererKind, Arc<dyn RecordRenderer>)>,
    chrome: Vec<(RendererKind, Arc<dyn ChromeRenderer>)>,
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field(
                "records",
                &self.records.iter().map(|(kind, _)| kind).collect::<Vec<_>>(),
            )
            .field(
                "chrome",
                &self.chrome.iter().map(|(kind, _)| kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RendererRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record renderer.
    pub fn register_record(&mut self, kind: RendererKind, renderer: Arc<dyn RecordRenderer>) {
        self.records.push((kind, renderer));
    }

    /// Registers a chrome renderer.
    pub fn register_chrome(&mut self, kind: RendererKind, renderer: Arc<dyn ChromeRenderer>) {
        self.chrome.push((kind, renderer));
    }

    /// Returns the record renderer registered for `kind`.
    #[must_use]
    pub fn record_renderer(&self, kind: &RendererKind) -> Option<&Arc<dyn RecordRenderer>> {
        self.records
            .iter()
            .find(|(registered, _)| registered == kind)
            .map(|(_, renderer)| renderer)
    }

    /// Returns the chrome renderer registered for `kind`.
    #[must_use]
    pub fn chrome_renderer(&self, kind: &RendererKind) -> Option<&Arc<dyn ChromeRenderer>> {
        self.chrome
            .iter()
            .find(|(registered, _)| registered == kind)
            .map(|(_, renderer)| renderer)
    }

    /// Returns `true` when no renderer is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty() && self.chrome.is_empty()
    }

    /// Builds the chat screen configuration for `connection_id`.
    #[must_use]
    pub fn assembler_config(
        &self,
        features: ChatFeatures,
        connection_id: Option<&ConnectionId>,
    ) -> AssemblerConfig {
        let render = |kind: RendererKind| {
            self.chrome_renderer(&kind)
                .map(|renderer| renderer.render(connection_id))
        };
        AssemblerConfig {
            features,
            header: render(RendererKind::ChatHeader),
            background: render(RendererKind::ChatBackground),
        }
    }
}

/// Chat screen configuration handed to the host's assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblerConfig {
    /// Feature toggles.
    pub features: ChatFeatures,
    /// Rendered header, when a header renderer is registered.
    pub header: Option<RenderedView>,
    /// Rendered background, when a background renderer is registered.
    pub background: Option<RenderedView>,
}
