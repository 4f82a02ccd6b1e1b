//! Host configuration.
//!
//! A single [`ChatConfig`] carries the chat screen's feature toggles, the
//! archetype issuer allow-list, overlay resolver settings, and the display
//! language. Every field has a default, so hosts may supply a partial JSON
//! document.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use crate::overlay::services::{CacheKeying, ResolverConfig};
pub use crate::timeline::domain::ArchetypeRules;

const DEFAULT_LANGUAGE: &str = "en";

/// Feature toggles exposed to the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatFeatures {
    /// Show the button that asks the peer for its workflow menu.
    pub show_menu_button: bool,
    /// Show the button that opens connection details.
    pub show_info_button: bool,
}

impl Default for ChatFeatures {
    fn default() -> Self {
        Self {
            show_menu_button: true,
            show_info_button: true,
        }
    }
}

/// Complete host configuration.
///
/// # Examples
///
/// ```
/// use exchange_chat::config::{CacheKeying, ChatConfig};
///
/// let config = ChatConfig::from_json(
///     r#"{
///         "features": {"showMenuButton": false},
///         "resolver": {"cache_keying": "subject_and_language"}
///     }"#,
/// )
/// .expect("valid configuration");
/// assert!(!config.features.show_menu_button);
/// assert!(config.features.show_info_button);
/// assert_eq!(config.resolver.cache_keying, CacheKeying::SubjectAndLanguage);
/// assert_eq!(config.language, "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Language used for overlay resolution.
    pub language: String,
    /// Chat screen feature toggles.
    pub features: ChatFeatures,
    /// Archetype classification settings.
    pub archetypes: ArchetypeRules,
    /// Overlay resolver settings.
    pub resolver: ResolverConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            features: ChatFeatures::default(),
            archetypes: ArchetypeRules::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ChatConfig {
    /// Parses a configuration document, filling omitted fields with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON or
    /// a field has the wrong type.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(document).map_err(|err| ConfigError::Parse(Arc::new(err)))
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The document could not be decoded.
    #[error("invalid chat configuration: {0}")]
    Parse(Arc<serde_json::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_document_yields_defaults() {
        let config = ChatConfig::from_json("{}").expect("valid");
        assert_eq!(config, ChatConfig::default());
    }

    #[rstest]
    fn issuer_fragments_are_read() {
        let config = ChatConfig::from_json(
            r#"{"language": "fr", "archetypes": {"identity_issuer_fragments": ["campus"]}}"#,
        )
        .expect("valid");

        assert_eq!(config.language, "fr");
        assert_eq!(config.archetypes.identity_issuer_fragments, ["campus"]);
        assert_eq!(config.resolver.cache_keying, CacheKeying::SubjectOnly);
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"features": {"showMenuButton": "yes"}}"#)]
    fn malformed_documents_are_rejected(#[case] document: &str) {
        assert!(matches!(
            ChatConfig::from_json(document),
            Err(ConfigError::Parse(_))
        ));
    }
}
