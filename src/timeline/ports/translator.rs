//! Localisation port.

/// Looks up localised strings by key.
pub trait Translator: Send + Sync {
    /// Returns the string for `key`, or the key itself when unknown.
    fn translate(&self, key: &str) -> String;
}
