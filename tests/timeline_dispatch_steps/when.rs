//! When steps for timeline dispatch BDD scenarios.

use super::world::{ENROLMENT_MENU, TimelineWorld, run_async};
use exchange_chat::timeline::{
    domain::{DisplayItem, MenuPayload, OtherPayload, RecordPayload, RecordRole},
    handlers::ActionMenuHandler,
};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"the peer sends "{text}""#)]
fn peer_sends(world: &mut TimelineWorld, text: String) {
    world.receive(RecordRole::Received, RecordPayload::basic_message(text));
}

#[when(r#"I send "{text}""#)]
fn i_send(world: &mut TimelineWorld, text: String) {
    world.receive(RecordRole::Sent, RecordPayload::basic_message(text));
}

#[when("the peer sends the enrolment menu")]
fn peer_sends_enrolment_menu(world: &mut TimelineWorld) {
    world.receive(
        RecordRole::Received,
        RecordPayload::basic_message(ENROLMENT_MENU),
    );
}

#[when(r#"the agent produces a "{kind}" record"#)]
fn agent_produces_record(world: &mut TimelineWorld, kind: String) {
    world.receive(
        RecordRole::Received,
        RecordPayload::Other(OtherPayload {
            kind,
            data: json!({}),
        }),
    );
}

#[when(r#"I press the "{label}" button"#)]
fn press_button(world: &mut TimelineWorld, label: String) -> Result<(), eyre::Report> {
    let record = world
        .record
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no record in scenario world"))?;
    let menu = record
        .message_content()
        .and_then(MenuPayload::parse)
        .ok_or_else(|| eyre::eyre!("last record is not a menu"))?;
    let index = menu
        .items()
        .iter()
        .position(|item| matches!(item, DisplayItem::Button { text, .. } if *text == label))
        .ok_or_else(|| eyre::eyre!("menu has no button labelled {label}"))?;
    let handler = ActionMenuHandler::new();
    let outcome = run_async(handler.press_button(record, index, world.registry.context()));
    world.press = Some(outcome);
    Ok(())
}
