//! Unit tests for timeline assembly.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::support::{MENU_JSON, credential, message, proof};
use crate::agent::{
    adapters::memory::InMemoryAgent,
    domain::{SubjectDefinition, SubjectId},
};
use crate::config::ChatConfig;
use crate::overlay::{adapters::catalog::StaticOverlayCatalog, services::OverlayResolver};
use crate::timeline::{
    domain::{CredentialState, MessageBody, ProofState, RecordId, RecordRole},
    registry::{Dispatch, HandlerRegistry},
    services::TimelineService,
};

#[fixture]
fn agent() -> InMemoryAgent {
    let agent = InMemoryAgent::new();
    agent.add_definition(SubjectDefinition::new(
        SubjectId::new("cd:student-card"),
        json!({
            "overlay": {
                "overlays": [
                    {"type": "spec/overlays/meta/1.0", "language": "en", "name": "Student Card"},
                    {"type": "spec/overlays/branding/1.0", "background_color": "#003366"}
                ]
            }
        }),
    ));
    agent
}

fn service(agent: &InMemoryAgent) -> TimelineService {
    let registry = HandlerRegistry::with_default_handlers(&ChatConfig::default());
    let resolver = OverlayResolver::new(Arc::new(StaticOverlayCatalog::new()))
        .with_agent(Arc::new(agent.clone()));
    TimelineService::new(Arc::new(registry), Arc::new(resolver))
}

#[rstest]
#[tokio::test]
async fn assemble_keeps_order_and_reports_left_out_records(agent: InMemoryAgent) {
    let records = vec![
        message("m1", RecordRole::Received, "hello"),
        message("m2", RecordRole::Sent, ":menu"),
        message("m3", RecordRole::Received, MENU_JSON),
        credential(
            "c1",
            CredentialState::OfferReceived,
            &[("student_id", "S-1"), ("full_name", "Ada Lovelace")],
        ),
        proof("p1", ProofState::RequestReceived, None),
    ];

    let report = service(&agent).assemble(&records).await;

    let ids: Vec<_> = report
        .messages
        .iter()
        .map(|entry| entry.id().as_str())
        .collect();
    assert_eq!(ids, ["m1", "m3", "c1", "p1"]);
    assert_eq!(report.hidden, [RecordId::new("m2")]);
    assert!(report.unhandled.is_empty());
}

#[rstest]
#[tokio::test]
async fn credential_subjects_resolve_once_per_subject(agent: InMemoryAgent) {
    let records = vec![
        credential("c1", CredentialState::OfferReceived, &[]),
        credential("c2", CredentialState::Done, &[]),
    ];

    let report = service(&agent).assemble(&records).await;

    assert_eq!(agent.definition_fetch_count(), 1);
    for entry in &report.messages {
        let MessageBody::Credential(card) = entry.body() else {
            panic!("credential card expected");
        };
        assert_eq!(card.title, "Student Card");
    }
}

#[rstest]
#[tokio::test]
async fn unresolvable_subject_falls_back_to_identifier() {
    let agent = InMemoryAgent::new();
    let timeline = service(&agent);

    let dispatched = timeline
        .dispatch(&credential("c1", CredentialState::OfferReceived, &[]))
        .await;

    let Dispatch::Message(entry) = dispatched else {
        panic!("message expected");
    };
    let MessageBody::Credential(card) = entry.body() else {
        panic!("credential card expected");
    };
    assert_eq!(card.title, "cd:student-card");
}

#[rstest]
#[tokio::test]
async fn basic_messages_skip_overlay_resolution(agent: InMemoryAgent) {
    let timeline = service(&agent);

    timeline
        .assemble(&[message("m1", RecordRole::Received, "hello")])
        .await;

    assert_eq!(agent.definition_fetch_count(), 0);
    assert_eq!(timeline.registry().len(), 4);
}
