//! Item identifier newtype with a smart constructor.
//!
//! Identifiers must be non-empty and stay stable across recomputation passes,
//! since the rendering side keys cells by them.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique, stable identifier of a caller-owned item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

/// Error returned when an item identifier is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Item id must not be empty")]
pub struct InvalidItemId;

impl ItemId {
    /// Smart constructor: validates non-empty id
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(InvalidItemId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = InvalidItemId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}
