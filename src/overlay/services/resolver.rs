//! Layered overlay resolution.
//!
//! Provides [`OverlayResolver`], which looks up a subject's overlay in the
//! bundled catalog, then in its cache, then through the agent.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::agent::{domain::SubjectId, ports::ExchangeAgent};
use crate::config::ChatConfig;
use crate::overlay::{
    domain::{OverlayBundle, OverlayError, extract_embedded_overlay},
    ports::OverlayCatalog,
};

/// How remotely resolved bundles are keyed in the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeying {
    /// Key by subject only. A subject first resolved in one language is
    /// returned in that language for every later request.
    #[default]
    SubjectOnly,
    /// Key by subject and language.
    SubjectAndLanguage,
}

/// Resolver configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Cache keying strategy.
    pub cache_keying: CacheKeying,
}

type CacheKey = (SubjectId, Option<String>);
type InFlight = Arc<OnceCell<Option<Arc<OverlayBundle>>>>;

#[derive(Debug, Default)]
struct ResolverState {
    bundles: HashMap<CacheKey, Arc<OverlayBundle>>,
    in_flight: HashMap<CacheKey, InFlight>,
}

/// Resolves overlay bundles for credential subjects.
///
/// Resolution short-circuits on the first success:
///
/// 1. the bundled [`OverlayCatalog`];
/// 2. the in-memory cache;
/// 3. the subject definition fetched through the agent, whose embedded
///    overlay is converted to the compact encoding and cached.
///
/// Resolves issued while a fetch for the same subject is in flight share
/// that fetch and its outcome, success or failure. Failures are logged and
/// yield `None`; they are not cached, so a later resolve retries.
pub struct OverlayResolver {
    catalog: Arc<dyn OverlayCatalog>,
    agent: Option<Arc<dyn ExchangeAgent>>,
    config: ResolverConfig,
    state: Mutex<ResolverState>,
    missing_agent_reported: AtomicBool,
}

impl fmt::Debug for OverlayResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayResolver")
            .field("has_agent", &self.agent.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OverlayResolver {
    /// Creates a resolver with no agent; only bundled overlays resolve.
    #[must_use]
    pub fn new(catalog: Arc<dyn OverlayCatalog>) -> Self {
        Self {
            catalog,
            agent: None,
            config: ResolverConfig::default(),
            state: Mutex::new(ResolverState::default()),
            missing_agent_reported: AtomicBool::new(false),
        }
    }

    /// Creates a resolver configured from the host's [`ChatConfig`].
    #[must_use]
    pub fn from_config(catalog: Arc<dyn OverlayCatalog>, config: &ChatConfig) -> Self {
        Self::new(catalog).with_config(config.resolver)
    }

    /// Sets the agent used for remote resolution.
    #[must_use]
    pub fn with_agent(mut self, agent: Arc<dyn ExchangeAgent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Sets the resolver configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves the overlay bundle for `subject_id` in `language`.
    ///
    /// Returns `None` when no layer can provide a bundle; callers fall back
    /// to an undecorated presentation.
    pub async fn resolve(
        &self,
        subject_id: &SubjectId,
        language: &str,
    ) -> Option<Arc<OverlayBundle>> {
        if let Some(bundle) = self.catalog.lookup(subject_id, language) {
            return Some(bundle);
        }

        let Some(agent) = self.agent.as_ref() else {
            self.report_missing_agent(subject_id);
            return None;
        };

        let key = self.cache_key(subject_id, language);
        let flight = {
            let mut state = self.lock_state();
            if let Some(bundle) = state.bundles.get(&key) {
                return Some(Arc::clone(bundle));
            }
            Arc::clone(state.in_flight.entry(key.clone()).or_default())
        };

        flight
            .get_or_init(|| async {
                let outcome = fetch_bundle(agent.as_ref(), subject_id, language).await;
                if let Err(err) = &outcome {
                    debug!(
                        subject_id = %subject_id,
                        error = %err,
                        "overlay resolution failed; using default presentation"
                    );
                }
                self.settle(&key, &flight, outcome.ok())
            })
            .await
            .clone()
    }

    /// Returns the cached bundle for `subject_id`, if resolved remotely.
    #[must_use]
    pub fn cached(&self, subject_id: &SubjectId, language: &str) -> Option<Arc<OverlayBundle>> {
        let key = self.cache_key(subject_id, language);
        self.lock_state().bundles.get(&key).cloned()
    }

    /// Drops every cached bundle.
    pub fn clear_cache(&self) {
        self.lock_state().bundles.clear();
    }

    /// Records the outcome of the fetch behind `flight` and retires it, so
    /// later resolves read the cache or start a fresh fetch.
    fn settle(
        &self,
        key: &CacheKey,
        flight: &InFlight,
        bundle: Option<Arc<OverlayBundle>>,
    ) -> Option<Arc<OverlayBundle>> {
        let mut state = self.lock_state();
        if state
            .in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            state.in_flight.remove(key);
        }
        if let Some(resolved) = &bundle {
            state.bundles.insert(key.clone(), Arc::clone(resolved));
        }
        bundle
    }

    fn report_missing_agent(&self, subject_id: &SubjectId) {
        if self.missing_agent_reported.swap(true, Ordering::Relaxed) {
            debug!(subject_id = %subject_id, "skipping remote overlay lookup");
        } else {
            warn!(
                subject_id = %subject_id,
                "overlay resolver has no agent configured; skipping remote lookup"
            );
        }
    }

    fn cache_key(&self, subject_id: &SubjectId, language: &str) -> CacheKey {
        match self.config.cache_keying {
            CacheKeying::SubjectOnly => (subject_id.clone(), None),
            CacheKeying::SubjectAndLanguage => (subject_id.clone(), Some(language.to_owned())),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ResolverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn fetch_bundle(
    agent: &dyn ExchangeAgent,
    subject_id: &SubjectId,
    language: &str,
) -> Result<Arc<OverlayBundle>, OverlayError> {
    let definition = agent.get_subject_definition(subject_id).await?;
    let embedded = extract_embedded_overlay(definition.metadata())?;
    let bundle =
        OverlayBundle::from_descriptive(subject_id.clone(), language, &Value::Object(embedded))?;
    Ok(Arc::new(bundle))
}
