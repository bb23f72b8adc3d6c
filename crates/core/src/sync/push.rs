//! Push cycle: client-created rows up to the backend.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};

use crate::entries::{AttendanceRepositoryTrait, EntryLogRepositoryTrait, SyncStatus};
use crate::errors::{DatabaseError, Error, Result};
use crate::sync::{
    AttendanceCreate, EntryCreate, PushOutcome, PushReport, PushRequest, SyncApi,
    SyncStateRepositoryTrait, WireEntrySource,
};
use crate::users::UserRepositoryTrait;

/// Uploads pending entry logs and attendance (plus the users they
/// reference) and reconciles local status from the server's per-category
/// processed counts.
///
/// Acknowledgment is position-based: the backend reports only how many
/// records of each category it processed, so exactly the first
/// `processed` rows in submission order flip to `synced`. Submission
/// order is pinned to ascending local id in both the scan and the
/// reconcile step.
pub struct PushSynchronizer {
    entry_logs: Arc<dyn EntryLogRepositoryTrait>,
    attendance: Arc<dyn AttendanceRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    state: Arc<dyn SyncStateRepositoryTrait>,
    api: Arc<dyn SyncApi>,
}

impl PushSynchronizer {
    pub fn new(
        entry_logs: Arc<dyn EntryLogRepositoryTrait>,
        attendance: Arc<dyn AttendanceRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        state: Arc<dyn SyncStateRepositoryTrait>,
        api: Arc<dyn SyncApi>,
    ) -> Self {
        Self {
            entry_logs,
            attendance,
            users,
            state,
            api,
        }
    }

    /// Run one batch push cycle.
    ///
    /// With nothing pending this returns the zero-count success without
    /// touching the network, the common steady-state case. A transport
    /// failure aborts before any status transition, so retrying later is
    /// safe.
    pub async fn push(&self, auth_token: Option<&str>) -> Result<PushReport> {
        let pending_entries = self.entry_logs.list_pending()?;
        let pending_attendance = self.attendance.list_pending()?;

        if pending_entries.is_empty() && pending_attendance.is_empty() {
            debug!("Nothing to push");
            return Ok(PushReport::nothing_to_sync());
        }
        debug!(
            "Pushing {} entry logs, {} attendance rows",
            pending_entries.len(),
            pending_attendance.len()
        );

        // Users referenced by the pending rows may not exist server-side
        // yet (walk-ins registered offline), so they ride along.
        let unique_codes: BTreeSet<String> = pending_entries
            .iter()
            .map(|log| log.unique_code.clone())
            .chain(pending_attendance.iter().map(|att| att.unique_code.clone()))
            .collect();
        let unique_codes: Vec<String> = unique_codes.into_iter().collect();
        let users = self.users.list_by_unique_codes(&unique_codes)?;

        let request = PushRequest {
            users_created: users,
            entries_created: pending_entries
                .iter()
                .map(|log| EntryCreate {
                    unique_code: log.unique_code.clone(),
                    admin_id: log.admin_id.clone(),
                    source: WireEntrySource::from(log.source),
                })
                .collect(),
            attendance_created: pending_attendance
                .iter()
                .map(|att| AttendanceCreate {
                    unique_code: att.unique_code.clone(),
                    event_id: att.event_id.clone(),
                    admin_id: att.admin_id.clone(),
                })
                .collect(),
        };

        let outcome = self.api.push(auth_token, &request).await?;
        self.reconcile(&pending_entries, &pending_attendance, &outcome)
            .await?;

        info!(
            "Push complete: entries {}/{}, attendance {}/{}, {} error(s)",
            outcome.entries.processed,
            outcome.entries.total,
            outcome.attendance.processed,
            outcome.attendance.total,
            outcome.errors.len()
        );
        Ok(PushReport::from(outcome))
    }

    async fn reconcile(
        &self,
        pending_entries: &[crate::entries::EntryLog],
        pending_attendance: &[crate::entries::Attendance],
        outcome: &PushOutcome,
    ) -> Result<()> {
        let synced_entry_ids: Vec<i64> = pending_entries
            .iter()
            .take(outcome.entries.processed)
            .filter_map(|log| log.id)
            .collect();
        let synced_attendance_ids: Vec<i64> = pending_attendance
            .iter()
            .take(outcome.attendance.processed)
            .filter_map(|att| att.id)
            .collect();

        // lastPushedAt records the attempted cycle regardless of how many
        // records the server accepted.
        self.state
            .reconcile_push(
                synced_entry_ids,
                synced_attendance_ids,
                Utc::now().to_rfc3339(),
            )
            .await
    }

    /// Best-effort immediate push of one just-created entry log.
    ///
    /// Used by the write path right after a mark while online. A row that
    /// is already `synced` is a no-op success (the status gate that makes
    /// a race with the batch cycle harmless). On failure the row simply
    /// stays `pending` for the next batch.
    pub async fn push_single_entry_log(&self, id: i64, auth_token: Option<&str>) -> Result<()> {
        let log = self.entry_logs.get(id)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("entry log {id}")))
        })?;
        if log.sync_status == SyncStatus::Synced {
            return Ok(());
        }

        let user = self
            .users
            .find_by_unique_code(&log.unique_code)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "user for unique code {}",
                    log.unique_code
                )))
            })?;

        let request = PushRequest {
            users_created: vec![user],
            entries_created: vec![EntryCreate {
                unique_code: log.unique_code.clone(),
                admin_id: log.admin_id.clone(),
                source: WireEntrySource::from(log.source),
            }],
            attendance_created: Vec::new(),
        };

        let outcome = self.api.push(auth_token, &request).await?;
        if outcome.entries.processed == 0 {
            warn!(
                "Immediate push of entry log {id} not processed by server: {:?}",
                outcome.errors
            );
            return Err(Error::network("entry log rejected by server"));
        }

        self.entry_logs.mark_synced(vec![id]).await
    }
}
