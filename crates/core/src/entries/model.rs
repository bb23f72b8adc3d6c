//! Client-created entry and attendance records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Upload state of a client-created row. `Pending` rows are picked up by
/// the next push cycle; `Synced` rows are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Pending,
    Synced,
}

/// Where an entry was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Marked from the attendee lookup dashboard (pre-registered user).
    Dashboard,
    /// Walk-in registered at the gate.
    Onspot,
}

impl EntrySource {
    /// Decode a stored source value. Unknown provenance is treated as a
    /// walk-in, the safer assumption for footfall accounting.
    pub fn parse_lossy(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "dashboard" | "online" => Self::Dashboard,
            _ => Self::Onspot,
        }
    }
}

/// One gate entry (footfall). Append-only; repeat entries for the same
/// code across visits are legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLog {
    /// Local surrogate key, assigned by the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub unique_code: String,
    pub admin_id: String,
    pub source: EntrySource,
    pub created_at: String,
    pub sync_status: SyncStatus,
}

/// One per-event check-in. A `(unique_code, event_id)` pair is marked at
/// most logically once; the write path checks, the store does not enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub unique_code: String,
    pub event_id: String,
    pub admin_id: String,
    pub created_at: String,
    pub sync_status: SyncStatus,
}

#[async_trait]
pub trait EntryLogRepositoryTrait: Send + Sync {
    fn get(&self, id: i64) -> Result<Option<EntryLog>>;

    /// Pending rows in insertion order (ascending local id). This order is
    /// the push submission order and must stay stable across the scan and
    /// the acknowledgment.
    fn list_pending(&self) -> Result<Vec<EntryLog>>;

    /// Entry logs whose `unique_code` is in the given set.
    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<EntryLog>>;

    /// Insert a new row, returning its assigned local id.
    async fn insert(&self, log: EntryLog) -> Result<i64>;

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()>;
}

#[async_trait]
pub trait AttendanceRepositoryTrait: Send + Sync {
    /// Pending rows in insertion order (ascending local id).
    fn list_pending(&self) -> Result<Vec<Attendance>>;

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Attendance>>;

    fn is_marked(&self, event_id: &str, unique_code: &str) -> Result<bool>;

    async fn insert(&self, attendance: Attendance) -> Result<i64>;

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()>;
}
