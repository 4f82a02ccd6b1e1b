//! Shared builders for timeline unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::agent::domain::SubjectId;
use crate::timeline::domain::{
    CredentialAttribute, CredentialPayload, CredentialState, ExchangeRecord, ProofPayload,
    ProofState, RecordId, RecordPayload, RecordRole,
};

pub fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second)
        .single()
        .expect("valid timestamp")
}

pub fn message(id: &str, role: RecordRole, content: &str) -> ExchangeRecord {
    ExchangeRecord::from_parts(
        RecordId::new(id),
        at(0),
        role,
        RecordPayload::basic_message(content),
    )
}

pub fn credential(id: &str, state: CredentialState, attributes: &[(&str, &str)]) -> ExchangeRecord {
    ExchangeRecord::from_parts(
        RecordId::new(id),
        at(0),
        RecordRole::Received,
        RecordPayload::Credential(CredentialPayload {
            state,
            subject_id: Some(SubjectId::new("cd:student-card")),
            attributes: attributes
                .iter()
                .map(|(name, value)| CredentialAttribute::new(*name, *value))
                .collect(),
        }),
    )
}

pub fn proof(id: &str, state: ProofState, is_verified: Option<bool>) -> ExchangeRecord {
    ExchangeRecord::from_parts(
        RecordId::new(id),
        at(0),
        RecordRole::Received,
        RecordPayload::Proof(ProofPayload {
            state,
            name: Some("Age check".to_owned()),
            subject_id: None,
            requested_attributes: vec!["birthdate".to_owned()],
            is_verified,
        }),
    )
}

pub const MENU_JSON: &str = r#"{
    "workflowID": "enrolment",
    "displayData": [
        {"type": "title", "text": "Welcome"},
        {"type": "text", "text": "Pick an option"},
        {"type": "button", "text": "Enrol", "actionID": "enrol", "data": {"course": "101"}},
        {"type": "button", "text": "Join", "actionID": "join",
         "invitationLink": "https://example.com/invite?oob=abc"},
        {"type": "carousel", "slides": []}
    ]
}"#;
