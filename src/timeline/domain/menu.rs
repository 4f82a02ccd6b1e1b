//! Structured workflow payloads carried inside basic messages.
//!
//! The transport has no type discriminator for these payloads; a menu is
//! recognised by sniffing the message body for a `displayData` array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel a user sends to ask the peer for its menu.
pub const MENU_REQUEST_TOKEN: &str = ":menu";

/// One typed content block of a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayItem {
    /// Heading text.
    Title {
        /// Heading text.
        #[serde(default)]
        text: String,
    },
    /// Body text.
    Text {
        /// Body text.
        #[serde(default)]
        text: String,
    },
    /// A button that triggers a workflow action or a connection.
    Button {
        /// Button label.
        #[serde(default)]
        text: String,
        /// Workflow action triggered by the button.
        #[serde(rename = "actionID", default)]
        action_id: String,
        /// Data sent with the action.
        #[serde(default)]
        data: Value,
        /// Invitation to connect through instead of sending an action.
        #[serde(
            rename = "invitationLink",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        invitation_link: Option<String>,
    },
    /// A block type this crate does not render.
    #[serde(other)]
    Unsupported,
}

/// A structured action menu sent by the peer.
///
/// Wire shape: `{"displayData": [{"type": ..., "text": ...}], "workflowID": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuPayload {
    #[serde(rename = "displayData")]
    items: Vec<DisplayItem>,
    #[serde(rename = "workflowID", default)]
    workflow_id: String,
}

impl MenuPayload {
    /// Creates a menu.
    #[must_use]
    pub fn new(workflow_id: impl Into<String>, items: Vec<DisplayItem>) -> Self {
        Self {
            items,
            workflow_id: workflow_id.into(),
        }
    }

    /// Sniffs `text` for a menu payload.
    ///
    /// Returns `None` unless `text` is a JSON object with a `displayData`
    /// array. Individual blocks that fail to decode become
    /// [`DisplayItem::Unsupported`] rather than rejecting the menu.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if !trimmed.starts_with('{') {
            return None;
        }
        let value: Value = serde_json::from_str(trimmed).ok()?;
        let raw_items = value.get("displayData")?.as_array()?;
        let items = raw_items
            .iter()
            .map(|item| {
                serde_json::from_value(item.clone()).unwrap_or(DisplayItem::Unsupported)
            })
            .collect();
        let workflow_id = value
            .get("workflowID")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self::new(workflow_id, items))
    }

    /// Returns the workflow the menu belongs to.
    #[must_use]
    pub fn workflow_id(&self) -> &str {
        &self.workflow_id
    }

    /// Returns the menu blocks in display order.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Returns the first title block's text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            DisplayItem::Title { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns the text used when the menu is summarised as plain text.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.title()
            .or_else(|| {
                self.items.iter().find_map(|item| match item {
                    DisplayItem::Text { text } => Some(text.as_str()),
                    _ => None,
                })
            })
            .unwrap_or(&self.workflow_id)
    }
}

/// A workflow action sent back to the peer as a basic message body.
///
/// Wire shape: `{"workflowID": ..., "actionID": ..., "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAction {
    /// Workflow the action belongs to.
    #[serde(rename = "workflowID")]
    pub workflow_id: String,
    /// Action identifier.
    #[serde(rename = "actionID")]
    pub action_id: String,
    /// Action data.
    #[serde(default)]
    pub data: Value,
}

impl WorkflowAction {
    /// Creates a workflow action.
    #[must_use]
    pub fn new(workflow_id: impl Into<String>, action_id: impl Into<String>, data: Value) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            action_id: action_id.into(),
            data,
        }
    }

    /// Encodes the action as a message body.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error if `data` cannot be encoded.
    pub fn to_message_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Returns `true` when `text` is a JSON object or array.
///
/// Self-sent structured payloads are machine-readable workflow traffic and
/// are hidden from the timeline.
#[must_use]
pub fn is_json_payload(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_str::<Value>(trimmed).is_ok()
}
