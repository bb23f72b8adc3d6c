//! Event catalog records.

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A managed event. Server-owned; only ever written locally by pull.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    /// Fill in `name` from the alternate field names the backend has used
    /// over time (`event_name`, `title`). Applied once at pull time so
    /// readers never re-derive it; `extra` itself is left untouched.
    pub fn normalize_name(&mut self) {
        if self.name.as_deref().is_some_and(|n| !n.is_empty()) {
            return;
        }
        for key in ["event_name", "title"] {
            if let Some(value) = self.extra.get(key).and_then(|v| v.as_str()) {
                if !value.is_empty() {
                    self.name = Some(value.to_string());
                    return;
                }
            }
        }
    }
}

pub trait EventRepositoryTrait: Send + Sync {
    fn get(&self, event_id: &str) -> Result<Option<Event>>;

    fn list(&self) -> Result<Vec<Event>>;
}
