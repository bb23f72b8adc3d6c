//! Small conversion helpers shared by the row models.

use gatecheck_core::errors::{DatabaseError, Error, Result};

/// Serialize an enum to its bare database token (serde string minus the
/// quotes), e.g. `SyncStatus::Pending` -> `pending`.
pub(crate) fn enum_to_db<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.trim_matches('"').to_string())
}

/// Parse an enum from its bare database token.
pub(crate) fn enum_from_db<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    Ok(serde_json::from_str(&format!("\"{}\"", value))?)
}

/// Persist the open side-map as a JSON text column; empty maps store NULL.
pub(crate) fn extra_to_db(extra: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    if extra.is_empty() {
        None
    } else {
        serde_json::to_string(extra).ok()
    }
}

/// Read the side-map back; a corrupt column is surfaced, not discarded.
pub(crate) fn extra_from_db(
    extra: Option<&str>,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    match extra {
        None => Ok(serde_json::Map::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| {
            Error::Database(DatabaseError::Internal(format!(
                "Corrupt extra-attributes column: {e}"
            )))
        }),
    }
}
