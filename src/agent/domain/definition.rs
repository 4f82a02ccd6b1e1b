//! Remote subject definitions.

use super::SubjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A credential subject definition fetched from the agent's ledger.
///
/// `metadata` is free-form JSON; issuers may embed an overlay object in it,
/// which the overlay resolver extracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDefinition {
    id: SubjectId,
    #[serde(default)]
    metadata: Value,
}

impl SubjectDefinition {
    /// Creates a subject definition.
    #[must_use]
    pub const fn new(id: SubjectId, metadata: Value) -> Self {
        Self { id, metadata }
    }

    /// Returns the subject identifier.
    #[must_use]
    pub const fn id(&self) -> &SubjectId {
        &self.id
    }

    /// Returns the raw metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Value {
        &self.metadata
    }
}
