//! Credential exchanges.

use tracing::warn;

use super::{HandlerContext, RecordHandler, fallback_message};
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{
    CredentialCard, CredentialPayload, CredentialState, ExchangeRecord, HandlerType, MessageBody,
    NavigationTarget, NormalizedMessage, RecordPayload,
};
use crate::timeline::ports::Translator;
use crate::timeline::registry::RendererKind;

const HANDLER_TYPE: &str = "credential";

const fn label_key(state: CredentialState) -> &'static str {
    match state {
        CredentialState::ProposalSent => "CredentialOffer.CredentialProposalSent",
        CredentialState::OfferReceived => "CredentialOffer.CredentialOfferReceived",
        CredentialState::OfferSent => "CredentialOffer.CredentialOfferSent",
        CredentialState::RequestSent => "CredentialOffer.CredentialAccepted",
        CredentialState::CredentialIssued => "CredentialOffer.CredentialIssued",
        CredentialState::CredentialReceived | CredentialState::Done => {
            "CredentialOffer.CredentialReceived"
        }
        CredentialState::Declined => "CredentialOffer.CredentialDeclined",
        CredentialState::Abandoned => "CredentialOffer.CredentialAbandoned",
    }
}

const fn credential_of(record: &ExchangeRecord) -> Option<&CredentialPayload> {
    match record.payload() {
        RecordPayload::Credential(credential) => Some(credential),
        _ => None,
    }
}

/// Accepts credential exchange records.
///
/// Projects to the host renderer registered for
/// [`RendererKind::Credential`] when there is one, else to the built-in
/// archetype card.
#[derive(Debug, Clone)]
pub struct CredentialHandler {
    handler_type: HandlerType,
}

impl Default for CredentialHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler_type: HandlerType::builtin(HANDLER_TYPE),
        }
    }
}

impl RecordHandler for CredentialHandler {
    fn handler_type(&self) -> &HandlerType {
        &self.handler_type
    }

    fn display_name(&self) -> &str {
        "Credential"
    }

    fn can_handle(&self, record: &ExchangeRecord) -> bool {
        credential_of(record).is_some()
    }

    fn display_label(&self, record: &ExchangeRecord, translator: &dyn Translator) -> String {
        credential_of(record).map_or_else(
            || translator.translate("CredentialOffer.Credential"),
            |credential| translator.translate(label_key(credential.state)),
        )
    }

    fn project(
        &self,
        record: &ExchangeRecord,
        subject: Option<&OverlayBundle>,
        context: &HandlerContext,
    ) -> NormalizedMessage {
        let Some(credential) = credential_of(record) else {
            warn!(
                record_id = %record.id(),
                "credential handler asked to project another record kind"
            );
            return fallback_message(self, record, context);
        };
        let label = self.display_label(record, context.translator());
        let (title, body) = context
            .renderers()
            .record_renderer(&RendererKind::Credential)
            .map_or_else(
                || {
                    let card = CredentialCard::build(credential, subject, context.archetypes());
                    (card.title.clone(), MessageBody::Credential(card))
                },
                |renderer| {
                    (
                        subject.map_or_else(String::new, |s| s.display_name().to_owned()),
                        MessageBody::Custom(renderer.render(record, subject)),
                    )
                },
            );
        let text = if title.is_empty() {
            label.clone()
        } else {
            format!("{label}: {title}")
        };
        NormalizedMessage::for_record(record, self.handler_type.clone(), text, body)
            .with_label(label)
            .with_role(self.role(record))
            .with_detail(self.detail_target(record))
    }

    fn detail_target(&self, record: &ExchangeRecord) -> Option<NavigationTarget> {
        let record_id = record.id().clone();
        match credential_of(record)?.state {
            CredentialState::OfferReceived => Some(NavigationTarget::CredentialOffer { record_id }),
            CredentialState::CredentialReceived | CredentialState::Done => {
                Some(NavigationTarget::CredentialDetails { record_id })
            }
            _ => None,
        }
    }
}
