use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::ItemError;

/// A validated item identifier.
///
/// Identifiers are UUID-shaped and checked for format before any store
/// access, so a malformed id never reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical hyphenated form.
    ///
    /// Only the 36-character hyphenated representation is accepted; the
    /// compact form is rejected as malformed.
    pub fn parse(value: &str) -> Result<Self, ItemError> {
        if value.len() != 36 {
            return Err(ItemError::InvalidId {
                value: value.to_string(),
            });
        }

        Uuid::try_parse(value)
            .map(Self)
            .map_err(|_| ItemError::InvalidId {
                value: value.to_string(),
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
