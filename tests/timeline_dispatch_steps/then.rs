//! Then steps for timeline dispatch BDD scenarios.

use super::world::{CONNECTION, TimelineWorld};
use exchange_chat::timeline::{
    domain::{MessageBody, NavigationTarget, NormalizedMessage},
    registry::Dispatch,
    services::MenuActionOutcome,
};
use rstest_bdd_macros::then;
use serde_json::Value;

fn displayed(world: &TimelineWorld) -> Result<&NormalizedMessage, eyre::Report> {
    match world.dispatch.as_ref() {
        Some(Dispatch::Message(message)) => Ok(message),
        other => Err(eyre::eyre!("expected a displayed message, got {other:?}")),
    }
}

#[then(r#"the record is displayed by the "{handler}" handler"#)]
fn displayed_by(world: &TimelineWorld, handler: String) -> Result<(), eyre::Report> {
    let message = displayed(world)?;
    if message.handler().as_str() != handler {
        return Err(eyre::eyre!(
            "expected handler {handler}, got {}",
            message.handler()
        ));
    }
    Ok(())
}

#[then(r#"the message links to "{target}""#)]
fn message_links_to(world: &TimelineWorld, target: String) -> Result<(), eyre::Report> {
    let MessageBody::Text(spans) = displayed(world)?.body() else {
        return Err(eyre::eyre!("expected a text body"));
    };
    if !spans.iter().any(|span| span.target() == Some(target.as_str())) {
        return Err(eyre::eyre!("no span links to {target}: {spans:?}"));
    }
    Ok(())
}

#[then(r#"the record is hidden by the "{handler}" handler"#)]
fn hidden_by(world: &TimelineWorld, handler: String) -> Result<(), eyre::Report> {
    match world.dispatch.as_ref() {
        Some(Dispatch::Hidden { handler: hidden_by }) if hidden_by.as_str() == handler => Ok(()),
        other => Err(eyre::eyre!("expected record hidden by {handler}, got {other:?}")),
    }
}

#[then("the record is unhandled")]
fn unhandled(world: &TimelineWorld) -> Result<(), eyre::Report> {
    if world.dispatch != Some(Dispatch::Unhandled) {
        return Err(eyre::eyre!("expected unhandled, got {:?}", world.dispatch));
    }
    Ok(())
}

#[then(r#"the peer receives action "{action}" for workflow "{workflow}""#)]
fn peer_receives_action(
    world: &TimelineWorld,
    action: String,
    workflow: String,
) -> Result<(), eyre::Report> {
    if world.press != Some(Ok(MenuActionOutcome::Sent)) {
        return Err(eyre::eyre!("expected a sent action, got {:?}", world.press));
    }
    let sent = world
        .agent
        .sent_messages()
        .pop()
        .ok_or_else(|| eyre::eyre!("nothing was sent"))?;
    let body: Value = serde_json::from_str(&sent.text)?;
    if body.get("actionID").and_then(Value::as_str) != Some(action.as_str())
        || body.get("workflowID").and_then(Value::as_str) != Some(workflow.as_str())
    {
        return Err(eyre::eyre!("unexpected workflow action: {body}"));
    }
    if sent.connection_id.as_str() != CONNECTION {
        return Err(eyre::eyre!("sent on {}", sent.connection_id));
    }
    Ok(())
}

#[then("the chat navigates to a new connection")]
fn navigates_to_new_connection(world: &TimelineWorld) -> Result<(), eyre::Report> {
    let Some(Ok(MenuActionOutcome::Connected(connection_id))) = world.press.as_ref() else {
        return Err(eyre::eyre!("expected a connection, got {:?}", world.press));
    };
    if connection_id.as_str() == CONNECTION {
        return Err(eyre::eyre!("expected a new connection"));
    }
    let expected = NavigationTarget::Connection {
        connection_id: connection_id.clone(),
    };
    if world.navigator.visited() != [expected] {
        return Err(eyre::eyre!(
            "unexpected navigation: {:?}",
            world.navigator.visited()
        ));
    }
    Ok(())
}
