//! Item list input.
//!
//! The driver reads a JSON array of items from disk. Library callers own their
//! item collection and never go through this module.

use crate::model::error::InputError;
use crate::model::Item;
use std::path::Path;
use tracing::info;

/// Read and decode a JSON array of items.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the path does not exist,
/// `InputError::Malformed` if the contents are not a valid item array, and
/// `InputError::Io` for other read failures.
pub fn load_items(path: &Path) -> Result<Vec<Item>, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let items = parse_items(&contents).map_err(|e| InputError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), count = items.len(), "Loaded items");
    Ok(items)
}

/// Decode a JSON array of items.
pub fn parse_items(json: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(json)
}
