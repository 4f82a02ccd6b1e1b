//! Ordered handler registry.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ChatConfig;
use crate::overlay::domain::OverlayBundle;
use crate::timeline::domain::{ExchangeRecord, HandlerType, NormalizedMessage};
use crate::timeline::handlers::{
    ActionMenuHandler, BasicMessageHandler, CredentialHandler, HandlerContext, ProofHandler,
    RecordHandler,
};

/// Outcome of dispatching one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// No handler accepted the record.
    Unhandled,
    /// A handler accepted the record but hid it from the timeline.
    Hidden {
        /// Handler that accepted the record.
        handler: HandlerType,
    },
    /// The record projected into a message.
    Message(NormalizedMessage),
}

impl Dispatch {
    /// Returns the message, if the record is displayed.
    #[must_use]
    pub fn into_message(self) -> Option<NormalizedMessage> {
        match self {
            Self::Message(message) => Some(message),
            Self::Unhandled | Self::Hidden { .. } => None,
        }
    }
}

/// Ordered list of record handlers.
///
/// Classification walks the list in registration order and picks the first
/// handler whose [`RecordHandler::can_handle`] accepts the record, so more
/// specific handlers must be registered before general ones. Duplicate type
/// tags are allowed; the earlier registration shadows the later one.
///
/// # Examples
///
/// ```
/// use exchange_chat::config::ChatConfig;
/// use exchange_chat::timeline::domain::{ExchangeRecord, RecordPayload, RecordRole};
/// use exchange_chat::timeline::registry::HandlerRegistry;
/// use mockable::DefaultClock;
///
/// let registry = HandlerRegistry::with_default_handlers(&ChatConfig::default());
/// let record = ExchangeRecord::new(
///     RecordRole::Received,
///     RecordPayload::basic_message("hello"),
///     &DefaultClock,
/// );
/// let message = registry.normalize(&record, None).expect("displayed");
/// assert_eq!(message.handler().as_str(), "basic_message");
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn RecordHandler>>,
    context: HandlerContext,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field(
                "handlers",
                &self
                    .handlers
                    .iter()
                    .map(|handler| handler.handler_type().as_str())
                    .collect::<Vec<_>>(),
            )
            .field("context", &self.context)
            .finish()
    }
}

impl HandlerRegistry {
    /// Creates an empty registry with a no-op context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in handlers in precedence
    /// order: action menu, proof, credential, basic message.
    #[must_use]
    pub fn with_default_handlers(config: &ChatConfig) -> Self {
        let mut registry = Self::new();
        registry.configure(HandlerContext::from_config(config));
        registry.register(Arc::new(ActionMenuHandler::new()));
        registry.register(Arc::new(ProofHandler::new()));
        registry.register(Arc::new(CredentialHandler::new()));
        registry.register(Arc::new(BasicMessageHandler::new()));
        registry
    }

    /// Appends a handler.
    pub fn register(&mut self, handler: Arc<dyn RecordHandler>) {
        if self
            .handlers
            .iter()
            .any(|existing| existing.handler_type() == handler.handler_type())
        {
            debug!(
                handler_type = %handler.handler_type(),
                "registering duplicate handler type; the earlier registration takes precedence"
            );
        }
        self.handlers.push(handler);
    }

    /// Appends a handler, returning the registry.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn RecordHandler>) -> Self {
        self.register(handler);
        self
    }

    /// Replaces the collaborators shared by every handler.
    pub fn configure(&mut self, context: HandlerContext) {
        self.context = context;
    }

    /// Returns the collaborators shared by every handler.
    #[must_use]
    pub const fn context(&self) -> &HandlerContext {
        &self.context
    }

    /// Returns the handlers in registration order.
    #[must_use]
    pub fn handlers(&self) -> &[Arc<dyn RecordHandler>] {
        &self.handlers
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` when no handler is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the first handler that accepts `record`.
    #[must_use]
    pub fn classify(&self, record: &ExchangeRecord) -> Option<Arc<dyn RecordHandler>> {
        let handler = self
            .handlers
            .iter()
            .find(|handler| handler.can_handle(record))
            .cloned();
        if handler.is_none() {
            trace!(record_id = %record.id(), "no handler accepts record");
        }
        handler
    }

    /// Classifies and projects `record`.
    #[must_use]
    pub fn dispatch(&self, record: &ExchangeRecord, subject: Option<&OverlayBundle>) -> Dispatch {
        self.classify(record).map_or(Dispatch::Unhandled, |handler| {
            self.dispatch_to(handler.as_ref(), record, subject)
        })
    }

    /// Projects `record` through an already-classified `handler`.
    #[must_use]
    pub fn dispatch_to(
        &self,
        handler: &dyn RecordHandler,
        record: &ExchangeRecord,
        subject: Option<&OverlayBundle>,
    ) -> Dispatch {
        if !handler.should_display(record) {
            trace!(
                record_id = %record.id(),
                handler_type = %handler.handler_type(),
                "record hidden from timeline"
            );
            return Dispatch::Hidden {
                handler: handler.handler_type().clone(),
            };
        }
        Dispatch::Message(handler.project(record, subject, &self.context))
    }

    /// Classifies and projects `record`, returning `None` when it is
    /// unhandled or hidden.
    #[must_use]
    pub fn normalize(
        &self,
        record: &ExchangeRecord,
        subject: Option<&OverlayBundle>,
    ) -> Option<NormalizedMessage> {
        self.dispatch(record, subject).into_message()
    }
}
