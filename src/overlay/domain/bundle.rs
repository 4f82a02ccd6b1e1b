//! The overlay bundle aggregate and its non-branding parts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::wire::{pick, pick_str};
use super::{BrandingOverlay, OverlayError, OverlayKind};
use crate::agent::domain::SubjectId;

/// Subject schema metadata shared by every language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureBase {
    /// Classification of the subject (for example a schema family).
    pub classification: String,
    /// Attribute names mapped to their declared types.
    pub attributes: BTreeMap<String, String>,
    /// Attributes flagged as sensitive.
    pub flagged_attributes: Vec<String>,
}

impl CaptureBase {
    /// Reads a capture base from either encoding.
    #[must_use]
    pub fn from_wire(object: &Map<String, Value>) -> Self {
        Self {
            classification: pick_str(object, "classification", "classification")
                .unwrap_or_default()
                .to_owned(),
            attributes: string_map(pick(object, "attributes", "attributes")),
            flagged_attributes: string_list(pick(
                object,
                "flagged_attributes",
                "flaggedAttributes",
            )),
        }
    }

    /// Encodes the capture base with descriptive keys.
    #[must_use]
    pub fn to_descriptive(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("classification".to_owned(), Value::from(self.classification.as_str()));
        object.insert("attributes".to_owned(), to_value_map(&self.attributes));
        object.insert(
            "flagged_attributes".to_owned(),
            Value::from(self.flagged_attributes.clone()),
        );
        object
    }
}

/// Human-readable subject description in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaOverlay {
    /// Language tag.
    pub language: String,
    /// Display name of the subject.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Issuer display name.
    pub issuer: String,
    /// Help text shown with the credential.
    pub credential_help_text: String,
    /// Support link shown with the credential.
    pub credential_support_url: String,
}

impl MetaOverlay {
    fn from_wire(object: &Map<String, Value>) -> Self {
        let text = |descriptive: &str, compact: &str| {
            pick_str(object, descriptive, compact)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            language: text("language", "language"),
            name: text("name", "name"),
            description: text("description", "description"),
            issuer: text("issuer", "issuer"),
            credential_help_text: text("credential_help_text", "credentialHelpText"),
            credential_support_url: text("credential_support_url", "credentialSupportUrl"),
        }
    }

    fn to_descriptive(&self) -> Map<String, Value> {
        [
            ("language", &self.language),
            ("name", &self.name),
            ("description", &self.description),
            ("issuer", &self.issuer),
            ("credential_help_text", &self.credential_help_text),
            ("credential_support_url", &self.credential_support_url),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), Value::from(value.as_str())))
        .collect()
    }
}

/// Attribute display labels in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOverlay {
    /// Language tag.
    pub language: String,
    /// Attribute names mapped to display labels.
    pub attribute_labels: BTreeMap<String, String>,
}

impl LabelOverlay {
    fn from_wire(object: &Map<String, Value>) -> Self {
        Self {
            language: pick_str(object, "language", "language")
                .unwrap_or_default()
                .to_owned(),
            attribute_labels: string_map(pick(object, "attribute_labels", "attributeLabels")),
        }
    }

    fn to_descriptive(&self) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("language".to_owned(), Value::from(self.language.as_str()));
        object.insert(
            "attribute_labels".to_owned(),
            to_value_map(&self.attribute_labels),
        );
        object
    }
}

/// Descriptive and branding metadata for one subject in one language.
///
/// Serialising the bundle yields the compact encoding;
/// [`OverlayBundle::to_descriptive`] and [`OverlayBundle::from_descriptive`]
/// convert to and from the descriptive encoding used by remote issuers.
///
/// # Examples
///
/// ```
/// use exchange_chat::agent::domain::SubjectId;
/// use exchange_chat::overlay::domain::OverlayBundle;
/// use serde_json::json;
///
/// let wire = json!({
///     "capture_base": {"classification": "transcript", "attributes": {"gpa": "Numeric"}},
///     "overlays": [
///         {"type": "spec/overlays/meta/1.0", "language": "en", "name": "Transcript"},
///         {"type": "aries/overlays/branding/1.0", "headerColor": "#123456"}
///     ]
/// });
/// let bundle = OverlayBundle::from_descriptive(SubjectId::new("cd-1"), "en", &wire)
///     .expect("overlay is an object");
/// assert_eq!(bundle.display_name(), "Transcript");
/// assert_eq!(bundle.branding().header_color, "#123456");
/// assert_eq!(bundle.branding().background_color, "#FFFFFF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayBundle {
    subject_id: SubjectId,
    language: String,
    #[serde(default)]
    capture_base: CaptureBase,
    #[serde(default)]
    meta: MetaOverlay,
    #[serde(default)]
    labels: LabelOverlay,
    #[serde(default)]
    branding: BrandingOverlay,
}

impl OverlayBundle {
    /// Creates a bundle with empty descriptive parts and default branding.
    #[must_use]
    pub fn new(subject_id: SubjectId, language: impl Into<String>) -> Self {
        Self {
            subject_id,
            language: language.into(),
            capture_base: CaptureBase::default(),
            meta: MetaOverlay::default(),
            labels: LabelOverlay::default(),
            branding: BrandingOverlay::default(),
        }
    }

    /// Sets the capture base.
    #[must_use]
    pub fn with_capture_base(mut self, capture_base: CaptureBase) -> Self {
        self.capture_base = capture_base;
        self
    }

    /// Sets the meta overlay.
    #[must_use]
    pub fn with_meta(mut self, meta: MetaOverlay) -> Self {
        self.meta = meta;
        self
    }

    /// Sets the label overlay.
    #[must_use]
    pub fn with_labels(mut self, labels: LabelOverlay) -> Self {
        self.labels = labels;
        self
    }

    /// Sets the branding overlay.
    #[must_use]
    pub fn with_branding(mut self, branding: BrandingOverlay) -> Self {
        self.branding = branding;
        self
    }

    /// Converts a descriptive overlay set into a bundle for `language`.
    ///
    /// For each overlay kind the first overlay tagged with `language` wins,
    /// else the first overlay of that kind. Either key encoding is accepted
    /// for every field; descriptive keys win when both are present.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotAnObject`] when `wire` is not an object.
    pub fn from_descriptive(
        subject_id: SubjectId,
        language: &str,
        wire: &Value,
    ) -> Result<Self, OverlayError> {
        let object = wire.as_object().ok_or(OverlayError::NotAnObject)?;
        let capture_base = pick(object, "capture_base", "captureBase")
            .and_then(Value::as_object)
            .map(CaptureBase::from_wire)
            .unwrap_or_default();

        let overlays: Vec<&Map<String, Value>> = object
            .get("overlays")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default();
        let select = |kind: OverlayKind| select_overlay(&overlays, kind, language);

        Ok(Self {
            subject_id,
            language: language.to_owned(),
            capture_base,
            meta: select(OverlayKind::Meta)
                .map(MetaOverlay::from_wire)
                .unwrap_or_default(),
            labels: select(OverlayKind::Label)
                .map(LabelOverlay::from_wire)
                .unwrap_or_default(),
            branding: select(OverlayKind::Branding)
                .map(BrandingOverlay::from_wire)
                .unwrap_or_default(),
        })
    }

    /// Encodes the bundle as a descriptive overlay set.
    #[must_use]
    pub fn to_descriptive(&self) -> Value {
        let overlays: Vec<Value> = OverlayKind::ALL
            .into_iter()
            .map(|kind| {
                let mut body = match kind {
                    OverlayKind::Meta => self.meta.to_descriptive(),
                    OverlayKind::Label => self.labels.to_descriptive(),
                    OverlayKind::Branding => self.branding.to_descriptive(),
                };
                body.insert("type".to_owned(), Value::from(kind.type_tag()));
                Value::Object(body)
            })
            .collect();

        let mut object = Map::new();
        object.insert(
            "capture_base".to_owned(),
            Value::Object(self.capture_base.to_descriptive()),
        );
        object.insert("overlays".to_owned(), Value::Array(overlays));
        Value::Object(object)
    }

    /// Returns the subject identifier.
    #[must_use]
    pub const fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Returns the language the bundle was resolved for.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the capture base.
    #[must_use]
    pub const fn capture_base(&self) -> &CaptureBase {
        &self.capture_base
    }

    /// Returns the meta overlay.
    #[must_use]
    pub const fn meta(&self) -> &MetaOverlay {
        &self.meta
    }

    /// Returns the label overlay.
    #[must_use]
    pub const fn labels(&self) -> &LabelOverlay {
        &self.labels
    }

    /// Returns the branding overlay.
    #[must_use]
    pub const fn branding(&self) -> &BrandingOverlay {
        &self.branding
    }

    /// Returns the subject's display name, falling back to its identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.meta.name.is_empty() {
            self.subject_id.as_str()
        } else {
            &self.meta.name
        }
    }

    /// Returns the display label for `attribute`, falling back to the raw
    /// attribute name.
    #[must_use]
    pub fn attribute_label<'a>(&'a self, attribute: &'a str) -> &'a str {
        self.labels
            .attribute_labels
            .get(attribute)
            .map_or(attribute, String::as_str)
    }
}

fn select_overlay<'a>(
    overlays: &[&'a Map<String, Value>],
    kind: OverlayKind,
    language: &str,
) -> Option<&'a Map<String, Value>> {
    let of_kind = || {
        overlays.iter().copied().filter(move |overlay| {
            overlay
                .get("type")
                .and_then(Value::as_str)
                .and_then(OverlayKind::from_type_tag)
                == Some(kind)
        })
    };
    of_kind()
        .find(|overlay| overlay.get("language").and_then(Value::as_str) == Some(language))
        .or_else(|| of_kind().next())
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, v)| v.as_str().map(|text| (key.clone(), text.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

fn to_value_map(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), Value::from(value.as_str())))
            .collect(),
    )
}
