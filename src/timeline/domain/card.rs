//! Built-in credential and proof cards.

use serde::{Deserialize, Serialize};

use super::archetype::{compose_full_name, find_by_alias};
use super::{
    Archetype, ArchetypeRules, CardFieldRole, CredentialPayload, ProofPayload, ProofState,
};
use crate::overlay::domain::{BrandingOverlay, OverlayBundle};

/// A labelled value on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardField {
    /// Role the field fills in the archetype layout, if any.
    pub role: Option<CardFieldRole>,
    /// Display label.
    pub label: String,
    /// Display value.
    pub value: String,
}

/// The built-in credential card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCard {
    /// Layout archetype.
    pub archetype: Archetype,
    /// Card title.
    pub title: String,
    /// Issuer name, empty when unknown.
    pub issuer: String,
    /// Fields in display order.
    pub fields: Vec<CardField>,
    /// Colours and images.
    pub branding: BrandingOverlay,
}

impl CredentialCard {
    /// Builds the card for a credential exchange.
    ///
    /// `subject` supplies the title, attribute labels, and branding; without
    /// it the card falls back to the subject identifier, raw attribute
    /// names, and neutral branding.
    #[must_use]
    pub fn build(
        credential: &CredentialPayload,
        subject: Option<&OverlayBundle>,
        rules: &ArchetypeRules,
    ) -> Self {
        let subject_id = credential.subject_id.as_ref().map(|id| id.as_str());
        let archetype = rules.classify(subject_id, &credential.attributes);
        let label_for = |name: &str| {
            subject.map_or_else(|| name.to_owned(), |s| s.attribute_label(name).to_owned())
        };

        let fields = if archetype == Archetype::Default {
            credential
                .attributes
                .iter()
                .map(|attribute| CardField {
                    role: None,
                    label: label_for(&attribute.name),
                    value: attribute.value.clone(),
                })
                .collect()
        } else {
            archetype
                .field_table()
                .iter()
                .filter_map(|(role, aliases)| {
                    find_by_alias(&credential.attributes, aliases)
                        .map(|attribute| CardField {
                            role: Some(*role),
                            label: label_for(&attribute.name),
                            value: attribute.value.clone(),
                        })
                        .or_else(|| {
                            if *role != CardFieldRole::FullName {
                                return None;
                            }
                            compose_full_name(&credential.attributes).map(|value| CardField {
                                role: Some(*role),
                                label: label_for("full_name"),
                                value,
                            })
                        })
                })
                .collect()
        };

        let title = subject
            .map(|s| s.display_name().to_owned())
            .or_else(|| subject_id.map(str::to_owned))
            .unwrap_or_default();

        Self {
            archetype,
            title,
            issuer: subject.map(|s| s.meta().issuer.clone()).unwrap_or_default(),
            fields,
            branding: subject
                .map(|s| s.branding().clone())
                .unwrap_or_default(),
        }
    }

    /// Returns the value filling `role`, if present.
    #[must_use]
    pub fn value_of(&self, role: CardFieldRole) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.role == Some(role))
            .map(|field| field.value.as_str())
    }
}

/// Outcome of a proof exchange as shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    /// Awaiting a response.
    Pending,
    /// A presentation was shared.
    Shared,
    /// The presentation verified.
    Verified,
    /// The presentation failed verification.
    NotVerified,
    /// The request was declined.
    Declined,
    /// The exchange was abandoned.
    Abandoned,
}

impl ProofStatus {
    /// Derives the status from a proof payload.
    #[must_use]
    pub const fn of(proof: &ProofPayload) -> Self {
        match (proof.state, proof.is_verified) {
            (ProofState::RequestReceived | ProofState::RequestSent, _) => Self::Pending,
            (ProofState::Declined, _) => Self::Declined,
            (ProofState::Abandoned, _) => Self::Abandoned,
            (_, Some(true)) => Self::Verified,
            (_, Some(false)) => Self::NotVerified,
            (
                ProofState::PresentationSent | ProofState::PresentationReceived | ProofState::Done,
                None,
            ) => Self::Shared,
        }
    }
}

/// The built-in proof card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCard {
    /// Card title.
    pub title: String,
    /// Requested attributes, labelled through the subject overlay when
    /// available.
    pub requested_attributes: Vec<String>,
    /// Exchange outcome.
    pub status: ProofStatus,
    /// Colours and images.
    pub branding: BrandingOverlay,
}

impl ProofCard {
    /// Builds the card for a proof exchange.
    #[must_use]
    pub fn build(
        proof: &ProofPayload,
        subject: Option<&OverlayBundle>,
        fallback_title: &str,
    ) -> Self {
        let title = proof
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_title.to_owned());
        Self {
            title,
            requested_attributes: proof
                .requested_attributes
                .iter()
                .map(|name| {
                    subject.map_or_else(|| name.clone(), |s| s.attribute_label(name).to_owned())
                })
                .collect(),
            status: ProofStatus::of(proof),
            branding: subject
                .map(|s| s.branding().clone())
                .unwrap_or_default(),
        }
    }
}
