//! Shared world state for timeline dispatch BDD scenarios.

use std::sync::Arc;

use exchange_chat::agent::{
    adapters::memory::InMemoryAgent,
    domain::{ConnectionId, ConnectionRecord, ConnectionState, InvitationId, ParsedInvitation},
};
use exchange_chat::config::ChatConfig;
use exchange_chat::timeline::{
    adapters::memory::{RecordingNavigator, RecordingLinkOpener},
    domain::{ExchangeRecord, RecordPayload, RecordRole},
    handlers::HandlerContext,
    registry::{Dispatch, HandlerRegistry},
    services::{MenuActionOutcome, UserAlert},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Connection the chat screen shows.
pub const CONNECTION: &str = "conn-1";

/// Invitation link carried by the menu's "Join" button.
pub const INVITE_LINK: &str = "https://example.com/invite?oob=enrolment";

/// Menu the peer sends in menu scenarios.
pub const ENROLMENT_MENU: &str = r#"{
    "workflowID": "enrolment",
    "displayData": [
        {"type": "title", "text": "Enrolment"},
        {"type": "button", "text": "Enrol", "actionID": "enrol", "data": {}},
        {"type": "button", "text": "Join", "actionID": "join",
         "invitationLink": "https://example.com/invite?oob=enrolment"}
    ]
}"#;

/// Scenario world for timeline dispatch behaviour tests.
pub struct TimelineWorld {
    /// Agent backing the chat.
    pub agent: InMemoryAgent,
    /// Records every navigation.
    pub navigator: RecordingNavigator,
    /// Registry under test.
    pub registry: HandlerRegistry,
    /// Last record produced in the scenario.
    pub record: Option<ExchangeRecord>,
    /// Outcome of dispatching the last record.
    pub dispatch: Option<Dispatch>,
    /// Outcome of the last button press.
    pub press: Option<Result<MenuActionOutcome, UserAlert>>,
}

impl TimelineWorld {
    /// Creates a world with one completed connection and a known invitation.
    #[must_use]
    pub fn new() -> Self {
        let agent = InMemoryAgent::new();
        agent.add_connection(ConnectionRecord::new(
            ConnectionId::new(CONNECTION),
            None,
            ConnectionState::Completed,
        ));
        agent.add_invitation(
            INVITE_LINK,
            ParsedInvitation::new(InvitationId::new("inv-enrolment"), None, INVITE_LINK),
        );
        Self {
            agent,
            navigator: RecordingNavigator::new(),
            registry: HandlerRegistry::new(),
            record: None,
            dispatch: None,
            press: None,
        }
    }

    /// Builds the default registry wired to this world's collaborators.
    pub fn install_default_registry(&mut self) {
        let config = ChatConfig::default();
        let mut registry = HandlerRegistry::with_default_handlers(&config);
        registry.configure(
            HandlerContext::from_config(&config)
                .with_agent(Arc::new(self.agent.clone()))
                .with_connection(ConnectionId::new(CONNECTION))
                .with_navigator(Arc::new(self.navigator.clone()))
                .with_link_opener(Arc::new(RecordingLinkOpener::new())),
        );
        self.registry = registry;
    }

    /// Records `payload` as produced by `role` and dispatches it.
    pub fn receive(&mut self, role: RecordRole, payload: RecordPayload) {
        let record = ExchangeRecord::new(role, payload, &DefaultClock)
            .with_connection(ConnectionId::new(CONNECTION));
        self.dispatch = Some(self.registry.dispatch(&record, None));
        self.record = Some(record);
    }
}

impl Default for TimelineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TimelineWorld {
    TimelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
