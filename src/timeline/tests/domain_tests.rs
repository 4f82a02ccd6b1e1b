//! Unit tests for timeline domain types.

use rstest::rstest;
use serde_json::json;

use super::support::{MENU_JSON, credential};
use crate::agent::domain::SubjectId;
use crate::overlay::domain::{BrandingOverlay, LabelOverlay, MetaOverlay, OverlayBundle};
use crate::timeline::domain::{
    Archetype, ArchetypeRules, CardFieldRole, CredentialAttribute, CredentialCard,
    CredentialState, DisplayItem, DomainError, HandlerType, LinkKind, MenuPayload, ProofCard,
    ProofState, ProofStatus, RecordPayload, TextSpan, WorkflowAction, classify_archetype,
    is_json_payload, linkify,
};

fn attributes(names: &[&str]) -> Vec<CredentialAttribute> {
    names
        .iter()
        .map(|name| CredentialAttribute::new(*name, "x"))
        .collect()
}

// Handler types

#[rstest]
#[case("basic_message", "basic_message")]
#[case("  Action-Menu ", "action-menu")]
fn handler_type_normalizes(#[case] raw: &str, #[case] expected: &str) {
    let handler_type = HandlerType::new(raw).expect("valid handler type");
    assert_eq!(handler_type.as_str(), expected);
}

#[rstest]
fn handler_type_rejects_invalid_values() {
    assert!(matches!(
        HandlerType::new("   "),
        Err(DomainError::EmptyHandlerType)
    ));
    assert!(matches!(
        HandlerType::new("menu.v2"),
        Err(DomainError::InvalidHandlerType(_))
    ));
    assert!(matches!(
        HandlerType::new("x".repeat(65)),
        Err(DomainError::HandlerTypeTooLong(_))
    ));
}

// Link extraction

#[rstest]
fn linkify_splits_urls_and_emails() {
    let spans = linkify("see www.example.com, then write to help@example.org.");

    assert_eq!(
        spans,
        vec![
            TextSpan::Plain {
                text: "see ".to_owned()
            },
            TextSpan::Link {
                text: "www.example.com".to_owned(),
                target: "https://www.example.com".to_owned(),
                kind: LinkKind::Url,
            },
            TextSpan::Plain {
                text: ", then write to ".to_owned()
            },
            TextSpan::Link {
                text: "help@example.org".to_owned(),
                target: "mailto:help@example.org".to_owned(),
                kind: LinkKind::Email,
            },
            TextSpan::Plain {
                text: ".".to_owned()
            },
        ]
    );
}

#[rstest]
#[case("")]
#[case("no links here")]
#[case("https://a.example/path?q=1 and mail@b.example")]
fn linkify_preserves_text(#[case] text: &str) {
    let rebuilt: String = linkify(text).iter().map(TextSpan::text).collect();
    assert_eq!(rebuilt, text);
}

#[rstest]
fn linkify_without_links_yields_single_plain_span() {
    assert_eq!(
        linkify("hello"),
        vec![TextSpan::Plain {
            text: "hello".to_owned()
        }]
    );
}

// Menu payloads

#[rstest]
fn menu_parse_reads_items_and_tolerates_unknown_blocks() {
    let menu = MenuPayload::parse(MENU_JSON).expect("menu");

    assert_eq!(menu.workflow_id(), "enrolment");
    assert_eq!(menu.title(), Some("Welcome"));
    assert_eq!(menu.items().len(), 5);
    assert_eq!(menu.items().get(4), Some(&DisplayItem::Unsupported));
    assert!(matches!(
        menu.items().get(3),
        Some(DisplayItem::Button { invitation_link: Some(link), .. }) if link.contains("oob=abc")
    ));
}

#[rstest]
#[case("hello")]
#[case("{not json")]
#[case(r#"{"displayData": "not an array"}"#)]
#[case(r#"[{"type": "title", "text": "array root"}]"#)]
#[case(r#"{"workflowID": "w"}"#)]
fn menu_parse_rejects_non_menus(#[case] text: &str) {
    assert!(MenuPayload::parse(text).is_none());
}

#[rstest]
fn menu_summary_falls_back_to_text_then_workflow() {
    let text_only = MenuPayload::new(
        "wf",
        vec![DisplayItem::Text {
            text: "Body".to_owned(),
        }],
    );
    let empty = MenuPayload::new("wf", Vec::new());

    assert_eq!(text_only.summary(), "Body");
    assert_eq!(empty.summary(), "wf");
}

#[rstest]
fn workflow_action_uses_wire_field_names() {
    let action = WorkflowAction::new("enrolment", "enrol", json!({"course": "101"}));
    let body = action.to_message_body().expect("encodes");
    let value: serde_json::Value = serde_json::from_str(&body).expect("json");

    assert_eq!(
        value,
        json!({"workflowID": "enrolment", "actionID": "enrol", "data": {"course": "101"}})
    );
}

#[rstest]
#[case("{\"a\": 1}", true)]
#[case("[1, 2]", true)]
#[case("  {\"a\": 1}  ", true)]
#[case("{broken", false)]
#[case(":menu", false)]
fn json_payload_detection(#[case] text: &str, #[case] expected: bool) {
    assert_eq!(is_json_payload(text), expected);
}

// Only objects and arrays count as structured payloads. Scalars parse as
// JSON but stay visible, so a self-sent "42" or "true" is shown as text.
#[rstest]
#[case("42")]
#[case("true")]
#[case("null")]
#[case("\"quoted\"")]
fn json_scalars_are_not_structured_payloads(#[case] text: &str) {
    assert!(serde_json::from_str::<serde_json::Value>(text).is_ok());
    assert!(!is_json_payload(text));
}

// Archetypes

#[rstest]
#[case(None, &["GPA", "name"], Archetype::Transcript)]
#[case(None, &["cumulative_gpa"], Archetype::Transcript)]
#[case(None, &["Year_Start", "school"], Archetype::Transcript)]
#[case(Some("cd:College-Transcript:1"), &["name"], Archetype::Transcript)]
#[case(None, &["studentId", "fullName"], Archetype::IdentityCard)]
#[case(None, &["member_id", "first_name", "last_name"], Archetype::IdentityCard)]
#[case(None, &["member_id", "first_name"], Archetype::Default)]
#[case(None, &["fullName"], Archetype::Default)]
#[case(None, &[], Archetype::Default)]
fn archetype_classification(
    #[case] subject_id: Option<&str>,
    #[case] names: &[&str],
    #[case] expected: Archetype,
) {
    assert_eq!(classify_archetype(subject_id, &attributes(names)), expected);
}

#[rstest]
fn transcript_rules_take_precedence_over_identity_rules() {
    let names = attributes(&["student_id", "full_name", "gpa"]);
    assert_eq!(classify_archetype(None, &names), Archetype::Transcript);
}

#[rstest]
fn configured_issuer_fragment_selects_identity_card() {
    let rules = ArchetypeRules::with_identity_issuer_fragments(["Campus-Card"]);
    let names = attributes(&["holder"]);

    assert_eq!(
        rules.classify(Some("did:campus-card:cd:1"), &names),
        Archetype::IdentityCard
    );
    assert_eq!(rules.classify(Some("did:other:cd:1"), &names), Archetype::Default);
    assert_eq!(
        ArchetypeRules::with_identity_issuer_fragments([""]).classify(Some("anything"), &names),
        Archetype::Default
    );
}

// Cards

#[rstest]
fn identity_card_composes_name_and_uses_overlay() {
    let record = credential(
        "c1",
        CredentialState::CredentialReceived,
        &[
            ("student_id", "S-42"),
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("expiry_date", "2030-01-01"),
        ],
    );
    let RecordPayload::Credential(payload) = record.payload() else {
        panic!("credential payload expected");
    };
    let subject = OverlayBundle::new(SubjectId::new("cd:student-card"), "en")
        .with_meta(MetaOverlay {
            name: "Student Card".to_owned(),
            issuer: "Example University".to_owned(),
            ..MetaOverlay::default()
        })
        .with_labels(LabelOverlay {
            language: "en".to_owned(),
            attribute_labels: [("student_id".to_owned(), "Student number".to_owned())]
                .into_iter()
                .collect(),
        })
        .with_branding(BrandingOverlay {
            background_color: "#123456".to_owned(),
            ..BrandingOverlay::default()
        });

    let card = CredentialCard::build(payload, Some(&subject), &ArchetypeRules::default());

    assert_eq!(card.archetype, Archetype::IdentityCard);
    assert_eq!(card.title, "Student Card");
    assert_eq!(card.issuer, "Example University");
    assert_eq!(card.value_of(CardFieldRole::FullName), Some("Ada Lovelace"));
    assert_eq!(card.value_of(CardFieldRole::ExpiryDate), Some("2030-01-01"));
    let member = card
        .fields
        .iter()
        .find(|field| field.role == Some(CardFieldRole::MemberId))
        .expect("member id field");
    assert_eq!(member.label, "Student number");
    assert_eq!(card.branding.background_color, "#123456");
}

#[rstest]
fn default_card_without_overlay_lists_raw_attributes() {
    let record = credential(
        "c2",
        CredentialState::OfferReceived,
        &[("colour", "blue"), ("size", "L")],
    );
    let RecordPayload::Credential(payload) = record.payload() else {
        panic!("credential payload expected");
    };

    let card = CredentialCard::build(payload, None, &ArchetypeRules::default());

    assert_eq!(card.archetype, Archetype::Default);
    assert_eq!(card.title, "cd:student-card");
    assert_eq!(card.issuer, "");
    let labels: Vec<_> = card.fields.iter().map(|field| field.label.as_str()).collect();
    assert_eq!(labels, ["colour", "size"]);
    assert_eq!(card.branding, BrandingOverlay::default());
}

#[rstest]
#[case(ProofState::RequestReceived, None, ProofStatus::Pending)]
#[case(ProofState::PresentationSent, None, ProofStatus::Shared)]
#[case(ProofState::Done, Some(true), ProofStatus::Verified)]
#[case(ProofState::PresentationReceived, Some(false), ProofStatus::NotVerified)]
#[case(ProofState::Declined, Some(true), ProofStatus::Declined)]
#[case(ProofState::Abandoned, None, ProofStatus::Abandoned)]
fn proof_status_follows_state(
    #[case] state: ProofState,
    #[case] is_verified: Option<bool>,
    #[case] expected: ProofStatus,
) {
    let record = super::support::proof("p", state, is_verified);
    let RecordPayload::Proof(payload) = record.payload() else {
        panic!("proof payload expected");
    };
    let card = ProofCard::build(payload, None, "Proof request");

    assert_eq!(card.status, expected);
    assert_eq!(card.title, "Age check");
    assert_eq!(card.requested_attributes, ["birthdate"]);
}
