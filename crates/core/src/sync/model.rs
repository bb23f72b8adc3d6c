//! Sync domain types and the storage/API seams.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entries::EntrySource;
use crate::enrollments::Enrollment;
use crate::errors::Result;
use crate::events::Event;
use crate::payments::Payment;
use crate::users::User;

/// `sync_meta` key for the pull checkpoint consumed by the next pull.
pub const META_LAST_PULLED_AT: &str = "lastPulledAt";

/// `sync_meta` key recording when a push cycle last completed.
pub const META_LAST_PUSHED_AT: &str = "lastPushedAt";

/// Entry provenance as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireEntrySource {
    Online,
    Onspot,
}

impl From<EntrySource> for WireEntrySource {
    fn from(source: EntrySource) -> Self {
        match source {
            EntrySource::Dashboard => Self::Online,
            EntrySource::Onspot => Self::Onspot,
        }
    }
}

/// One pull response: server-owned entity deltas since the checkpoint,
/// plus the server timestamp that becomes the next checkpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PullBatch {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub enrollments: Vec<Enrollment>,
    pub payments: Vec<Payment>,
    pub timestamp: String,
}

/// Per-entity counts of records received by a pull (not necessarily
/// records changed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullCounts {
    pub users: usize,
    pub events: usize,
    pub enrollments: usize,
    pub payments: usize,
}

impl PullCounts {
    pub fn of(batch: &PullBatch) -> Self {
        Self {
            users: batch.users.len(),
            events: batch.events.len(),
            enrollments: batch.enrollments.len(),
            payments: batch.payments.len(),
        }
    }
}

/// Entry row as submitted to the push endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCreate {
    pub unique_code: String,
    pub admin_id: String,
    pub source: WireEntrySource,
}

/// Attendance row as submitted to the push endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCreate {
    pub unique_code: String,
    pub event_id: String,
    pub admin_id: String,
}

/// One batched push submission. Empty categories are omitted from the
/// wire request entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushRequest {
    pub users_created: Vec<User>,
    pub entries_created: Vec<EntryCreate>,
    pub attendance_created: Vec<AttendanceCreate>,
}

/// Per-category acknowledgment counts from the push endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub total: usize,
    pub processed: usize,
}

/// Server response to a push: how much of each category was processed,
/// plus human-readable reasons for anything rejected. Partial failure is
/// normal, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushOutcome {
    pub users: CategoryCounts,
    pub entries: CategoryCounts,
    pub attendance: CategoryCounts,
    pub errors: Vec<String>,
}

/// Result of one push cycle as reported to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PushReport {
    pub users: CategoryCounts,
    pub entries: CategoryCounts,
    pub attendance: CategoryCounts,
    pub errors: Vec<String>,
}

impl PushReport {
    /// The steady-state "nothing to sync" success, returned without a
    /// network round trip.
    pub fn nothing_to_sync() -> Self {
        Self::default()
    }

    pub fn is_noop(&self) -> bool {
        self.users.total == 0 && self.entries.total == 0 && self.attendance.total == 0
    }
}

impl From<PushOutcome> for PushReport {
    fn from(outcome: PushOutcome) -> Self {
        Self {
            users: outcome.users,
            entries: outcome.entries,
            attendance: outcome.attendance,
            errors: outcome.errors,
        }
    }
}

/// The two backend endpoints, as the core consumes them.
#[async_trait]
pub trait SyncApi: Send + Sync {
    /// POST `/sync/pull`. `last_pulled_at = None` requests a full resync.
    async fn pull(
        &self,
        auth_token: Option<&str>,
        last_pulled_at: Option<&str>,
    ) -> Result<PullBatch>;

    /// POST `/sync/push`.
    async fn push(&self, auth_token: Option<&str>, request: &PushRequest) -> Result<PushOutcome>;
}

/// Storage operations the sync cycles need, each atomic across every
/// table it touches.
#[async_trait]
pub trait SyncStateRepositoryTrait: Send + Sync {
    fn last_pulled_at(&self) -> Result<Option<String>>;

    fn last_pushed_at(&self) -> Result<Option<String>>;

    /// Upsert the whole batch and advance the checkpoint in one
    /// transaction: either everything lands (including the new
    /// `lastPulledAt`) or nothing does.
    async fn apply_pull(&self, batch: PullBatch) -> Result<()>;

    /// Flip the given rows to `synced` and record `lastPushedAt`, in one
    /// transaction.
    async fn reconcile_push(
        &self,
        synced_entry_ids: Vec<i64>,
        synced_attendance_ids: Vec<i64>,
        pushed_at: String,
    ) -> Result<()>;
}
