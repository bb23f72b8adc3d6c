//! User-to-event enrollment joins.

use serde::{Deserialize, Serialize};

/// Enrollment of a user in an event, optionally as part of a team.
/// Server-owned; only ever written locally by pull.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub enrollment_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
