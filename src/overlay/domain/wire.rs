//! Helpers for reading overlays in either wire encoding.

use serde_json::{Map, Value};

use super::OverlayError;

/// Metadata keys under which issuers embed overlays, in lookup order.
const EMBEDDED_OVERLAY_KEYS: [&str; 2] = ["overlay", "oca"];

/// Kind of a typed overlay inside an overlay set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Name, description, and issuer text.
    Meta,
    /// Per-attribute display labels.
    Label,
    /// Colours, images, and highlighted attributes.
    Branding,
}

impl OverlayKind {
    /// Every overlay kind, in emission order.
    pub const ALL: [Self; 3] = [Self::Meta, Self::Label, Self::Branding];

    /// Recognises an overlay `type` tag.
    ///
    /// Accepts bare tags (`"branding"`) and versioned paths
    /// (`"aries/overlays/branding/1.0"`).
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        lowered.split('/').find_map(|segment| match segment {
            "meta" => Some(Self::Meta),
            "label" => Some(Self::Label),
            "branding" => Some(Self::Branding),
            _ => None,
        })
    }

    /// Returns the versioned tag emitted in the descriptive encoding.
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::Meta => "spec/overlays/meta/1.0",
            Self::Label => "spec/overlays/label/1.0",
            Self::Branding => "aries/overlays/branding/1.0",
        }
    }
}

/// Extracts the overlay object embedded in subject metadata.
///
/// Issuers store it either as a nested object or as a JSON string.
///
/// # Errors
///
/// Returns [`OverlayError::MissingOverlay`] when no embedded overlay exists,
/// [`OverlayError::InvalidJson`] when a string payload fails to parse, and
/// [`OverlayError::NotAnObject`] when the payload is not an object.
pub fn extract_embedded_overlay(metadata: &Value) -> Result<Map<String, Value>, OverlayError> {
    let embedded = EMBEDDED_OVERLAY_KEYS
        .iter()
        .find_map(|key| metadata.get(*key))
        .ok_or(OverlayError::MissingOverlay)?;

    let parsed = match embedded {
        Value::String(raw) => serde_json::from_str::<Value>(raw)?,
        other => other.clone(),
    };

    match parsed {
        Value::Object(object) => Ok(object),
        _ => Err(OverlayError::NotAnObject),
    }
}

/// Returns the value under the descriptive key, else the compact key.
pub(super) fn pick<'a>(
    object: &'a Map<String, Value>,
    descriptive: &str,
    compact: &str,
) -> Option<&'a Value> {
    object
        .get(descriptive)
        .filter(|value| !value.is_null())
        .or_else(|| object.get(compact).filter(|value| !value.is_null()))
}

/// Like [`pick`], keeping only string values.
pub(super) fn pick_str<'a>(
    object: &'a Map<String, Value>,
    descriptive: &str,
    compact: &str,
) -> Option<&'a str> {
    pick(object, descriptive, compact).and_then(Value::as_str)
}
