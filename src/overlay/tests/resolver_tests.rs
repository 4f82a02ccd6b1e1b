//! Unit tests for layered overlay resolution.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::agent::{
    adapters::memory::InMemoryAgent,
    domain::{SubjectDefinition, SubjectId},
    ports::{AgentError, MockExchangeAgent},
};
use crate::config::ChatConfig;
use crate::overlay::{
    adapters::catalog::StaticOverlayCatalog,
    domain::{MetaOverlay, OverlayBundle},
    services::{CacheKeying, OverlayResolver, ResolverConfig},
};
use rstest::{fixture, rstest};
use serde_json::json;

const REMOTE_SUBJECT: &str = "cd:remote:transcript";

fn remote_definition() -> SubjectDefinition {
    SubjectDefinition::new(
        SubjectId::new(REMOTE_SUBJECT),
        json!({
            "overlay": {
                "capture_base": {"attributes": {"gpa": "Numeric"}},
                "overlays": [
                    {"type": "spec/overlays/meta/1.0", "language": "en", "name": "Transcript"},
                    {"type": "spec/overlays/meta/1.0", "language": "fr", "name": "Relevé"},
                    {"type": "aries/overlays/branding/1.0", "background_color": "#0A0A0A"}
                ]
            }
        }),
    )
}

#[fixture]
fn agent() -> InMemoryAgent {
    let agent = InMemoryAgent::new();
    agent.add_definition(remote_definition());
    agent.add_definition(SubjectDefinition::new(
        SubjectId::new("cd:plain"),
        json!({"tag": "no overlay here"}),
    ));
    agent
}

fn resolver_for(agent: &InMemoryAgent) -> OverlayResolver {
    OverlayResolver::new(Arc::new(StaticOverlayCatalog::new())).with_agent(Arc::new(agent.clone()))
}

#[rstest]
#[tokio::test]
async fn bundled_overlay_wins_without_remote_fetch(agent: InMemoryAgent) {
    let subject = SubjectId::new(REMOTE_SUBJECT);
    let bundled = OverlayBundle::new(subject.clone(), "en").with_meta(MetaOverlay {
        name: "Bundled".to_owned(),
        ..MetaOverlay::default()
    });
    let resolver = OverlayResolver::new(Arc::new(StaticOverlayCatalog::new().with_bundle(bundled)))
        .with_agent(Arc::new(agent.clone()));

    let resolved = resolver.resolve(&subject, "en").await.expect("bundled");

    assert_eq!(resolved.display_name(), "Bundled");
    assert_eq!(agent.definition_fetch_count(), 0);
}

#[rstest]
#[tokio::test]
async fn remote_overlay_is_converted_and_cached(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let first = resolver.resolve(&subject, "en").await.expect("remote");
    let second = resolver.resolve(&subject, "en").await.expect("cached");

    assert_eq!(first.display_name(), "Transcript");
    assert_eq!(first.branding().background_color, "#0A0A0A");
    assert_eq!(first.branding().header_color, "#000000");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(agent.definition_fetch_count(), 1);
    assert!(resolver.cached(&subject, "en").is_some());
}

#[rstest]
#[tokio::test]
async fn concurrent_resolves_share_one_fetch() {
    let agent = InMemoryAgent::new().with_fetch_delay(Duration::from_millis(50));
    agent.add_definition(remote_definition());
    let resolver = resolver_for(&agent);
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let (first, second) = tokio::join!(
        resolver.resolve(&subject, "en"),
        resolver.resolve(&subject, "en")
    );

    let first_bundle = first.expect("first caller resolves");
    let second_bundle = second.expect("second caller resolves");
    assert!(Arc::ptr_eq(&first_bundle, &second_bundle));
    assert_eq!(agent.definition_fetch_count(), 1);
}

#[rstest]
#[tokio::test]
async fn concurrent_failed_resolves_share_one_fetch() {
    let agent = InMemoryAgent::new().with_fetch_delay(Duration::from_millis(50));
    let resolver = resolver_for(&agent);
    let missing = SubjectId::new("cd:missing");

    let (first, second, third) = tokio::join!(
        resolver.resolve(&missing, "en"),
        resolver.resolve(&missing, "en"),
        resolver.resolve(&missing, "en")
    );

    assert!(first.is_none());
    assert!(second.is_none());
    assert!(third.is_none());
    assert_eq!(agent.definition_fetch_count(), 1);

    assert!(resolver.resolve(&missing, "en").await.is_none());
    assert_eq!(agent.definition_fetch_count(), 2);
}

#[rstest]
#[tokio::test]
async fn distinct_subjects_resolve_independently(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);

    let remote_subject = SubjectId::new(REMOTE_SUBJECT);
    let plain_subject = SubjectId::new("cd:plain");

    let (remote, plain) = tokio::join!(
        resolver.resolve(&remote_subject, "en"),
        resolver.resolve(&plain_subject, "en")
    );

    assert!(remote.is_some());
    assert!(plain.is_none());
    assert_eq!(agent.definition_fetch_count(), 2);
}

#[rstest]
#[tokio::test]
async fn failed_resolution_is_not_cached(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);
    let missing = SubjectId::new("cd:missing");

    assert!(resolver.resolve(&missing, "en").await.is_none());
    assert!(resolver.resolve(&missing, "en").await.is_none());

    assert_eq!(agent.definition_fetch_count(), 2);
    assert!(resolver.cached(&missing, "en").is_none());
}

#[rstest]
#[tokio::test]
async fn metadata_without_overlay_resolves_to_none(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);
    assert!(
        resolver
            .resolve(&SubjectId::new("cd:plain"), "en")
            .await
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn resolver_without_agent_degrades_to_none() {
    let resolver = OverlayResolver::new(Arc::new(StaticOverlayCatalog::new()));
    assert!(
        resolver
            .resolve(&SubjectId::new(REMOTE_SUBJECT), "en")
            .await
            .is_none()
    );
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn missing_agent_is_warned_about_once() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);
    let resolver = OverlayResolver::new(Arc::new(StaticOverlayCatalog::new()));

    for _ in 0..3 {
        assert!(
            resolver
                .resolve(&SubjectId::new(REMOTE_SUBJECT), "en")
                .await
                .is_none()
        );
    }

    let text = logs.text();
    assert_eq!(text.matches("no agent configured").count(), 1);
    assert_eq!(text.matches("skipping remote overlay lookup").count(), 2);
}

#[rstest]
#[tokio::test]
async fn agent_failure_degrades_to_none() {
    let mut mock = MockExchangeAgent::new();
    mock.expect_get_subject_definition()
        .times(1)
        .returning(|_| Err(AgentError::agent(std::io::Error::other("ledger offline"))));
    let resolver =
        OverlayResolver::new(Arc::new(StaticOverlayCatalog::new())).with_agent(Arc::new(mock));

    assert!(
        resolver
            .resolve(&SubjectId::new(REMOTE_SUBJECT), "en")
            .await
            .is_none()
    );
}

// Cache keying ignores language by default: the first language resolved for
// a subject is served for every later language.
#[rstest]
#[tokio::test]
async fn default_cache_returns_first_resolved_language(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let english = resolver.resolve(&subject, "en").await.expect("en");
    let french = resolver.resolve(&subject, "fr").await.expect("fr");

    assert_eq!(french.language(), "en");
    assert_eq!(french.display_name(), "Transcript");
    assert!(Arc::ptr_eq(&english, &french));
    assert_eq!(agent.definition_fetch_count(), 1);
}

#[rstest]
#[tokio::test]
async fn language_aware_cache_resolves_each_language(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent).with_config(ResolverConfig {
        cache_keying: CacheKeying::SubjectAndLanguage,
    });
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let english = resolver.resolve(&subject, "en").await.expect("en");
    let french = resolver.resolve(&subject, "fr").await.expect("fr");

    assert_eq!(english.display_name(), "Transcript");
    assert_eq!(french.display_name(), "Relevé");
    assert_eq!(agent.definition_fetch_count(), 2);
}

#[rstest]
#[tokio::test]
async fn resolver_from_config_uses_configured_keying(agent: InMemoryAgent) {
    let config =
        ChatConfig::from_json(r#"{"resolver": {"cache_keying": "subject_and_language"}}"#)
            .expect("valid configuration");
    let resolver = OverlayResolver::from_config(Arc::new(StaticOverlayCatalog::new()), &config)
        .with_agent(Arc::new(agent.clone()));
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let french = resolver.resolve(&subject, "fr").await.expect("fr");

    assert_eq!(french.display_name(), "Relevé");
    assert!(resolver.cached(&subject, "en").is_none());
}

#[rstest]
#[tokio::test]
async fn abandoned_resolve_leaves_cache_usable() {
    let agent = InMemoryAgent::new().with_fetch_delay(Duration::from_millis(30));
    agent.add_definition(remote_definition());
    let resolver = resolver_for(&agent);
    let subject = SubjectId::new(REMOTE_SUBJECT);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(1), resolver.resolve(&subject, "en")).await;
    assert!(abandoned.is_err());

    let resolved = resolver.resolve(&subject, "en").await;
    assert!(resolved.is_some());
}

#[rstest]
#[tokio::test]
async fn clearing_cache_forces_refetch(agent: InMemoryAgent) {
    let resolver = resolver_for(&agent);
    let subject = SubjectId::new(REMOTE_SUBJECT);

    resolver.resolve(&subject, "en").await.expect("first");
    resolver.clear_cache();
    resolver.resolve(&subject, "en").await.expect("second");

    assert_eq!(agent.definition_fetch_count(), 2);
}
