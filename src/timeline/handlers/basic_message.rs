//! Plain text messages.

use tracing::warn;

use super::{HandlerContext, RecordHandler};
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{
    ExchangeRecord, HandlerType, MENU_REQUEST_TOKEN, MenuPayload, MessageBody, NormalizedMessage,
    RecordRole, is_json_payload, linkify,
};
use crate::timeline::ports::{LinkOpenError, Translator};

const HANDLER_TYPE: &str = "basic_message";
const LABEL_KEY: &str = "Chat.Message";

/// Accepts basic messages that carry no structured payload.
///
/// URLs and email addresses in the body become tappable spans.
#[derive(Debug, Clone)]
pub struct BasicMessageHandler {
    handler_type: HandlerType,
}

impl Default for BasicMessageHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicMessageHandler {
    /// Creates the handler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler_type: HandlerType::builtin(HANDLER_TYPE),
        }
    }

    /// Opens a link span's target through the context's link opener.
    ///
    /// # Errors
    ///
    /// Returns the link opener's error.
    pub async fn open_link(
        &self,
        target: &str,
        context: &HandlerContext,
    ) -> Result<(), LinkOpenError> {
        context.link_opener().open(target).await.inspect_err(|err| {
            warn!(link = target, error = %err, "failed to open link");
        })
    }
}

impl RecordHandler for BasicMessageHandler {
    fn handler_type(&self) -> &HandlerType {
        &self.handler_type
    }

    fn display_name(&self) -> &str {
        "Basic message"
    }

    fn can_handle(&self, record: &ExchangeRecord) -> bool {
        record
            .message_content()
            .is_some_and(|content| MenuPayload::parse(content).is_none())
    }

    fn display_label(&self, _record: &ExchangeRecord, translator: &dyn Translator) -> String {
        translator.translate(LABEL_KEY)
    }

    fn project(
        &self,
        record: &ExchangeRecord,
        _subject: Option<&OverlayBundle>,
        context: &HandlerContext,
    ) -> NormalizedMessage {
        let content = record.message_content().unwrap_or_default();
        NormalizedMessage::for_record(
            record,
            self.handler_type.clone(),
            content,
            MessageBody::Text(linkify(content)),
        )
        .with_label(self.display_label(record, context.translator()))
        .with_role(self.role(record))
    }

    fn should_display(&self, record: &ExchangeRecord) -> bool {
        if record.role() != RecordRole::Sent {
            return true;
        }
        let content = record.message_content().unwrap_or_default();
        content.trim() != MENU_REQUEST_TOKEN && !is_json_payload(content)
    }
}
