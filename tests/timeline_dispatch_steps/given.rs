//! Given steps for timeline dispatch BDD scenarios.

use super::world::{ENROLMENT_MENU, TimelineWorld};
use exchange_chat::timeline::domain::{RecordPayload, RecordRole};
use rstest_bdd_macros::given;

#[given("the default handler registry")]
fn default_handler_registry(world: &mut TimelineWorld) {
    world.install_default_registry();
}

#[given("the peer sent the enrolment menu")]
fn peer_sent_enrolment_menu(world: &mut TimelineWorld) {
    world.receive(
        RecordRole::Received,
        RecordPayload::basic_message(ENROLMENT_MENU),
    );
}
