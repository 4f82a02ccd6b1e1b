//! Proof exchanges.

use tracing::warn;

use super::{HandlerContext, RecordHandler, fallback_message};
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{
    ExchangeRecord, HandlerType, MessageBody, NavigationTarget, NormalizedMessage, ProofCard,
    ProofPayload, ProofState, ProofStatus, RecordPayload,
};
use crate::timeline::ports::Translator;
use crate::timeline::registry::RendererKind;

const HANDLER_TYPE: &str = "proof";
const FALLBACK_TITLE_KEY: &str = "ProofRequest.ProofRequest";

const fn label_key(proof: &ProofPayload) -> &'static str {
    match (proof.state, ProofStatus::of(proof)) {
        (ProofState::RequestReceived, _) => "ProofRequest.ProofRequestReceived",
        (ProofState::RequestSent, _) => "ProofRequest.ProofRequestSent",
        (_, ProofStatus::Declined) => "ProofRequest.ProofRequestDeclined",
        (_, ProofStatus::Abandoned) => "ProofRequest.ProofRequestAbandoned",
        (_, ProofStatus::Verified) => "ProofRequest.ProofVerified",
        (_, ProofStatus::NotVerified) => "ProofRequest.ProofNotVerified",
        (ProofState::PresentationSent, _) => "ProofRequest.PresentationSent",
        _ => "ProofRequest.PresentationReceived",
    }
}

const fn proof_of(record: &ExchangeRecord) -> Option<&ProofPayload> {
    match record.payload() {
        RecordPayload::Proof(proof) => Some(proof),
        _ => None,
    }
}

/// Accepts proof exchange records.
///
/// Projects to the host renderer registered for [`RendererKind::Proof`]
/// when there is one, else to the built-in request summary card.
#[derive(Debug, Clone)]
pub struct ProofHandler {
    handler_type: HandlerType,
}

impl Default for ProofHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler_type: HandlerType::builtin(HANDLER_TYPE),
        }
    }
}

impl RecordHandler for ProofHandler {
    fn handler_type(&self) -> &HandlerType {
        &self.handler_type
    }

    fn display_name(&self) -> &str {
        "Proof"
    }

    fn can_handle(&self, record: &ExchangeRecord) -> bool {
        proof_of(record).is_some()
    }

    fn display_label(&self, record: &ExchangeRecord, translator: &dyn Translator) -> String {
        proof_of(record).map_or_else(
            || translator.translate(FALLBACK_TITLE_KEY),
            |proof| translator.translate(label_key(proof)),
        )
    }

    fn project(
        &self,
        record: &ExchangeRecord,
        subject: Option<&OverlayBundle>,
        context: &HandlerContext,
    ) -> NormalizedMessage {
        let Some(proof) = proof_of(record) else {
            warn!(record_id = %record.id(), "proof handler asked to project another record kind");
            return fallback_message(self, record, context);
        };
        let label = self.display_label(record, context.translator());
        let fallback_title = context.translate(FALLBACK_TITLE_KEY);
        let body = context
            .renderers()
            .record_renderer(&RendererKind::Proof)
            .map_or_else(
                || MessageBody::Proof(ProofCard::build(proof, subject, &fallback_title)),
                |renderer| MessageBody::Custom(renderer.render(record, subject)),
            );
        let title = proof
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&fallback_title);
        NormalizedMessage::for_record(
            record,
            self.handler_type.clone(),
            format!("{label}: {title}"),
            body,
        )
        .with_label(label)
        .with_role(self.role(record))
        .with_detail(self.detail_target(record))
    }

    fn detail_target(&self, record: &ExchangeRecord) -> Option<NavigationTarget> {
        let record_id = record.id().clone();
        match proof_of(record)?.state {
            ProofState::RequestReceived => Some(NavigationTarget::ProofRequest { record_id }),
            ProofState::PresentationSent
            | ProofState::PresentationReceived
            | ProofState::Done => Some(NavigationTarget::ProofDetails { record_id }),
            _ => None,
        }
    }
}
