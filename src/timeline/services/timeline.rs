//! Timeline assembly: records in, chat messages out.

use std::sync::Arc;

use tracing::debug;

use crate::overlay::{domain::OverlayBundle, services::OverlayResolver};
use crate::timeline::domain::{ExchangeRecord, NormalizedMessage, RecordId};
use crate::timeline::handlers::RecordHandler;
use crate::timeline::registry::{Dispatch, HandlerRegistry};

/// Messages assembled from a batch of records, plus the records left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineReport {
    /// Displayed messages, in record order.
    pub messages: Vec<NormalizedMessage>,
    /// Records accepted by a handler but hidden.
    pub hidden: Vec<RecordId>,
    /// Records no handler accepted.
    pub unhandled: Vec<RecordId>,
}

/// Projects exchange records into chat messages, resolving the overlay of
/// each record's subject on the way.
///
/// Records are processed sequentially in arrival order. Dropping an
/// in-flight assembly (for example when the chat screen closes) leaves the
/// registry and resolver consistent.
#[derive(Debug, Clone)]
pub struct TimelineService {
    registry: Arc<HandlerRegistry>,
    resolver: Arc<OverlayResolver>,
}

impl TimelineService {
    /// Creates a service over a configured registry and resolver.
    #[must_use]
    pub const fn new(registry: Arc<HandlerRegistry>, resolver: Arc<OverlayResolver>) -> Self {
        Self { registry, resolver }
    }

    /// Returns the handler registry.
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Dispatches one record.
    pub async fn dispatch(&self, record: &ExchangeRecord) -> Dispatch {
        let Some(handler) = self.registry.classify(record) else {
            return Dispatch::Unhandled;
        };
        let subject = self.resolve_subject(handler.as_ref(), record).await;
        self.registry
            .dispatch_to(handler.as_ref(), record, subject.as_deref())
    }

    async fn resolve_subject(
        &self,
        handler: &dyn RecordHandler,
        record: &ExchangeRecord,
    ) -> Option<Arc<OverlayBundle>> {
        let subject_id = handler.subject_id(record)?;
        self.resolver
            .resolve(subject_id, self.registry.context().language())
            .await
    }

    /// Assembles the timeline for `records`.
    pub async fn assemble(&self, records: &[ExchangeRecord]) -> TimelineReport {
        let mut report = TimelineReport::default();
        for record in records {
            match self.dispatch(record).await {
                Dispatch::Message(message) => report.messages.push(message),
                Dispatch::Hidden { .. } => report.hidden.push(record.id().clone()),
                Dispatch::Unhandled => report.unhandled.push(record.id().clone()),
            }
        }
        debug!(
            displayed = report.messages.len(),
            hidden = report.hidden.len(),
            unhandled = report.unhandled.len(),
            "timeline assembled"
        );
        report
    }
}
