//! The record handler contract and the built-in handlers.
//!
//! A handler decides whether it accepts a record and, once it has, projects
//! the record into a [`NormalizedMessage`]. Handlers never fail: a handler
//! that cannot make sense of a record it accepted still produces a
//! best-effort message.

mod action_menu;
mod basic_message;
mod context;
mod credential;
mod proof;

pub use action_menu::{ActionMenuHandler, MENU_MEMO_CAPACITY};
pub use basic_message::BasicMessageHandler;
pub use context::HandlerContext;
pub use credential::CredentialHandler;
pub use proof::ProofHandler;

use crate::agent::domain::SubjectId;
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{
    ExchangeRecord, HandlerType, MessageBody, MessageRole, NavigationTarget, NormalizedMessage,
    linkify,
};
use crate::timeline::ports::Translator;

/// Classifies and projects one kind of exchange record.
///
/// Implementations must be cheap to query: [`RecordHandler::can_handle`] is
/// called for every record until a handler accepts it.
pub trait RecordHandler: Send + Sync {
    /// Returns the handler's type tag.
    fn handler_type(&self) -> &HandlerType;

    /// Returns a human-readable handler name.
    fn display_name(&self) -> &str;

    /// Returns `true` when the handler accepts `record`.
    ///
    /// Malformed payloads yield `false`, never an error.
    fn can_handle(&self, record: &ExchangeRecord) -> bool;

    /// Returns which side of the chat the record is drawn on.
    fn role(&self, record: &ExchangeRecord) -> MessageRole {
        record.role().into()
    }

    /// Returns the localised label shown above the message.
    fn display_label(&self, record: &ExchangeRecord, translator: &dyn Translator) -> String;

    /// Returns the subject whose overlay the projection needs, if any.
    fn subject_id<'a>(&self, record: &'a ExchangeRecord) -> Option<&'a SubjectId> {
        record.subject_id()
    }

    /// Projects an accepted record into a chat message.
    fn project(
        &self,
        record: &ExchangeRecord,
        subject: Option<&OverlayBundle>,
        context: &HandlerContext,
    ) -> NormalizedMessage;

    /// Returns the screen opened when the message is tapped.
    fn detail_target(&self, _record: &ExchangeRecord) -> Option<NavigationTarget> {
        None
    }

    /// Returns `false` when an accepted record should be left out of the
    /// timeline.
    fn should_display(&self, _record: &ExchangeRecord) -> bool {
        true
    }
}

/// Builds the message produced when a handler is asked to project a record
/// whose payload it cannot read.
pub(crate) fn fallback_message(
    handler: &dyn RecordHandler,
    record: &ExchangeRecord,
    context: &HandlerContext,
) -> NormalizedMessage {
    let label = handler.display_label(record, context.translator());
    let text = record.message_content().unwrap_or(&label).to_owned();
    NormalizedMessage::for_record(
        record,
        handler.handler_type().clone(),
        text.clone(),
        MessageBody::Text(linkify(&text)),
    )
    .with_label(label)
    .with_role(handler.role(record))
}
