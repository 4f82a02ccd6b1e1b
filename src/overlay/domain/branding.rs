//! Branding overlay and its two-way field mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::wire::pick_str;

/// Neutral background used when an issuer declares none.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#FFFFFF";

/// Neutral header and footer colour used when an issuer declares none.
pub const DEFAULT_CHROME_COLOR: &str = "#000000";

/// A single branding field, naming both of its wire keys.
///
/// Every descriptive key has exactly one compact counterpart, so the two
/// encodings convert without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrandingField {
    /// Issuer logo image.
    Logo,
    /// Full card background image.
    BackgroundImage,
    /// Narrow background image used for list rows.
    BackgroundImageSlice,
    /// Primary card colour.
    BackgroundColor,
    /// Secondary card colour.
    SecondaryBackgroundColor,
    /// Card header colour.
    HeaderColor,
    /// Card footer colour.
    FooterColor,
    /// Attribute highlighted as the card's main value.
    PrimaryAttribute,
    /// Attribute shown beneath the primary one.
    SecondaryAttribute,
    /// Attribute holding the issue date.
    IssuedDateAttribute,
    /// Attribute holding the expiry date.
    ExpiryDateAttribute,
}

impl BrandingField {
    /// Every branding field, in wire order.
    pub const ALL: [Self; 11] = [
        Self::Logo,
        Self::BackgroundImage,
        Self::BackgroundImageSlice,
        Self::BackgroundColor,
        Self::SecondaryBackgroundColor,
        Self::HeaderColor,
        Self::FooterColor,
        Self::PrimaryAttribute,
        Self::SecondaryAttribute,
        Self::IssuedDateAttribute,
        Self::ExpiryDateAttribute,
    ];

    /// Returns the key used by the descriptive (`snake_case`) encoding.
    #[must_use]
    pub const fn descriptive_key(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::BackgroundImage => "background_image",
            Self::BackgroundImageSlice => "background_image_slice",
            Self::BackgroundColor => "background_color",
            Self::SecondaryBackgroundColor => "secondary_background_color",
            Self::HeaderColor => "header_color",
            Self::FooterColor => "footer_color",
            Self::PrimaryAttribute => "primary_attribute",
            Self::SecondaryAttribute => "secondary_attribute",
            Self::IssuedDateAttribute => "issued_date_attribute",
            Self::ExpiryDateAttribute => "expiry_date_attribute",
        }
    }

    /// Returns the key used by the compact (`camelCase`) encoding.
    #[must_use]
    pub const fn compact_key(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::BackgroundImage => "backgroundImage",
            Self::BackgroundImageSlice => "backgroundImageSlice",
            Self::BackgroundColor => "backgroundColor",
            Self::SecondaryBackgroundColor => "secondaryBackgroundColor",
            Self::HeaderColor => "headerColor",
            Self::FooterColor => "footerColor",
            Self::PrimaryAttribute => "primaryAttribute",
            Self::SecondaryAttribute => "secondaryAttribute",
            Self::IssuedDateAttribute => "issuedDateAttribute",
            Self::ExpiryDateAttribute => "expiryDateAttribute",
        }
    }

    /// Returns the value used when neither encoding supplies the field.
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::BackgroundColor => DEFAULT_BACKGROUND_COLOR,
            Self::HeaderColor | Self::FooterColor => DEFAULT_CHROME_COLOR,
            _ => "",
        }
    }
}

/// Branding overlay in the compact encoding.
///
/// Every field is a plain string; absent fields hold
/// [`BrandingField::default_value`], never an empty option, so render paths
/// always receive a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandingOverlay {
    /// Issuer logo image.
    pub logo: String,
    /// Full card background image.
    pub background_image: String,
    /// Narrow background image used for list rows.
    pub background_image_slice: String,
    /// Primary card colour.
    pub background_color: String,
    /// Secondary card colour.
    pub secondary_background_color: String,
    /// Card header colour.
    pub header_color: String,
    /// Card footer colour.
    pub footer_color: String,
    /// Attribute highlighted as the card's main value.
    pub primary_attribute: String,
    /// Attribute shown beneath the primary one.
    pub secondary_attribute: String,
    /// Attribute holding the issue date.
    pub issued_date_attribute: String,
    /// Attribute holding the expiry date.
    pub expiry_date_attribute: String,
}

impl Default for BrandingOverlay {
    fn default() -> Self {
        let mut overlay = Self {
            logo: String::new(),
            background_image: String::new(),
            background_image_slice: String::new(),
            background_color: String::new(),
            secondary_background_color: String::new(),
            header_color: String::new(),
            footer_color: String::new(),
            primary_attribute: String::new(),
            secondary_attribute: String::new(),
            issued_date_attribute: String::new(),
            expiry_date_attribute: String::new(),
        };
        for field in BrandingField::ALL {
            overlay.set(field, field.default_value());
        }
        overlay
    }
}

impl BrandingOverlay {
    /// Returns the value of `field`.
    #[must_use]
    pub fn get(&self, field: BrandingField) -> &str {
        match field {
            BrandingField::Logo => &self.logo,
            BrandingField::BackgroundImage => &self.background_image,
            BrandingField::BackgroundImageSlice => &self.background_image_slice,
            BrandingField::BackgroundColor => &self.background_color,
            BrandingField::SecondaryBackgroundColor => &self.secondary_background_color,
            BrandingField::HeaderColor => &self.header_color,
            BrandingField::FooterColor => &self.footer_color,
            BrandingField::PrimaryAttribute => &self.primary_attribute,
            BrandingField::SecondaryAttribute => &self.secondary_attribute,
            BrandingField::IssuedDateAttribute => &self.issued_date_attribute,
            BrandingField::ExpiryDateAttribute => &self.expiry_date_attribute,
        }
    }

    /// Replaces the value of `field`.
    pub fn set(&mut self, field: BrandingField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Builds a branding overlay from a wire object in either encoding.
    ///
    /// When both keys of a field are present the descriptive key wins. Keys
    /// that are missing or not strings fall back to the field default.
    #[must_use]
    pub fn from_wire(object: &Map<String, Value>) -> Self {
        let mut overlay = Self::default();
        for field in BrandingField::ALL {
            if let Some(value) = pick_str(object, field.descriptive_key(), field.compact_key()) {
                overlay.set(field, value);
            }
        }
        overlay
    }

    /// Encodes the overlay with descriptive keys.
    #[must_use]
    pub fn to_descriptive(&self) -> Map<String, Value> {
        self.encode(BrandingField::descriptive_key)
    }

    /// Encodes the overlay with compact keys.
    #[must_use]
    pub fn to_compact(&self) -> Map<String, Value> {
        self.encode(BrandingField::compact_key)
    }

    fn encode(&self, key: fn(BrandingField) -> &'static str) -> Map<String, Value> {
        BrandingField::ALL
            .into_iter()
            .map(|field| (key(field).to_owned(), Value::from(self.get(field))))
            .collect()
    }

    fn slot_mut(&mut self, field: BrandingField) -> &mut String {
        match field {
            BrandingField::Logo => &mut self.logo,
            BrandingField::BackgroundImage => &mut self.background_image,
            BrandingField::BackgroundImageSlice => &mut self.background_image_slice,
            BrandingField::BackgroundColor => &mut self.background_color,
            BrandingField::SecondaryBackgroundColor => &mut self.secondary_background_color,
            BrandingField::HeaderColor => &mut self.header_color,
            BrandingField::FooterColor => &mut self.footer_color,
            BrandingField::PrimaryAttribute => &mut self.primary_attribute,
            BrandingField::SecondaryAttribute => &mut self.secondary_attribute,
            BrandingField::IssuedDateAttribute => &mut self.issued_date_attribute,
            BrandingField::ExpiryDateAttribute => &mut self.expiry_date_attribute,
        }
    }
}
