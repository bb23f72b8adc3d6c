//! Write path for gate entries, attendance, and walk-in registration.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use log::warn;
use uuid::Uuid;

use crate::admins::AdminRepositoryTrait;
use crate::codes::CodeAllocator;
use crate::connectivity::ConnectivityProbe;
use crate::entries::{
    Attendance, AttendanceRepositoryTrait, EntryLog, EntryLogRepositoryTrait, EntrySource,
    SyncStatus,
};
use crate::errors::{Error, Result};
use crate::session::AdminSession;
use crate::sync::PushSynchronizer;
use crate::users::{NewWalkInUser, User, UserRepositoryTrait};

/// Records gate entries and attendance as durable local facts the moment
/// the operator acts, independent of connectivity.
///
/// When the device reports itself online, a just-created entry log is
/// pushed on a detached task. The mark never waits on the network, and a
/// failed immediate push simply leaves the row `pending` for the next
/// batch cycle.
pub struct EntryService {
    entry_logs: Arc<dyn EntryLogRepositoryTrait>,
    attendance: Arc<dyn AttendanceRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    admins: Arc<dyn AdminRepositoryTrait>,
    allocator: CodeAllocator,
    connectivity: Arc<dyn ConnectivityProbe>,
    push: Arc<PushSynchronizer>,
}

impl EntryService {
    pub fn new(
        entry_logs: Arc<dyn EntryLogRepositoryTrait>,
        attendance: Arc<dyn AttendanceRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        admins: Arc<dyn AdminRepositoryTrait>,
        connectivity: Arc<dyn ConnectivityProbe>,
        push: Arc<PushSynchronizer>,
    ) -> Self {
        let allocator = CodeAllocator::new(admins.clone());
        Self {
            entry_logs,
            attendance,
            users,
            admins,
            allocator,
            connectivity,
            push,
        }
    }

    fn require_admin(&self, session: &AdminSession) -> Result<String> {
        // A session object can outlive the stored admin (e.g. local data
        // cleared); the write paths refuse to record against a ghost id.
        self.admins.current()?.ok_or(Error::NoAdmin)?;
        Ok(session.admin_id.clone())
    }

    /// Record a gate entry for the given unique code.
    ///
    /// The row is durable before this returns; the caller can update its
    /// optimistic "marked" set from the returned record.
    pub async fn mark_entry(&self, session: &AdminSession, unique_code: &str) -> Result<EntryLog> {
        let admin_id = self.require_admin(session)?;

        let mut log = EntryLog {
            id: None,
            unique_code: unique_code.to_string(),
            admin_id,
            source: EntrySource::Dashboard,
            created_at: Utc::now().to_rfc3339(),
            sync_status: SyncStatus::Pending,
        };
        let id = self.entry_logs.insert(log.clone()).await?;
        log.id = Some(id);

        self.spawn_immediate_push(id);
        Ok(log)
    }

    /// Record per-event attendance for the given unique code.
    ///
    /// Refuses a logical duplicate for the `(event_id, unique_code)` pair;
    /// the store itself keeps no uniqueness constraint on it.
    pub async fn mark_attendance(
        &self,
        session: &AdminSession,
        event_id: &str,
        unique_code: &str,
    ) -> Result<Attendance> {
        let admin_id = self.require_admin(session)?;

        if self.attendance.is_marked(event_id, unique_code)? {
            return Err(Error::validation(format!(
                "attendance already marked for {unique_code} at event {event_id}"
            )));
        }

        let mut record = Attendance {
            id: None,
            unique_code: unique_code.to_string(),
            event_id: event_id.to_string(),
            admin_id,
            created_at: Utc::now().to_rfc3339(),
            sync_status: SyncStatus::Pending,
        };
        let id = self.attendance.insert(record.clone()).await?;
        record.id = Some(id);
        Ok(record)
    }

    /// Register a walk-in at the gate: allocate the next unique code,
    /// create the user and their paired entry log, then commit the code
    /// counter. The counter commit is deliberately last: a crash before
    /// it leaves a gap in the issued sequence, never a duplicate code.
    pub async fn register_onspot(
        &self,
        session: &AdminSession,
        details: NewWalkInUser,
    ) -> Result<User> {
        let reserved = self.allocator.reserve()?;
        let now = Utc::now().to_rfc3339();

        let user = User {
            user_id: Uuid::new_v4().to_string(),
            unique_code: reserved.code.clone(),
            name: details.name,
            email: details.email,
            mobile_number: details.mobile_number,
            department: details.department,
            gender: details.gender,
            year: details.year,
            college: details.college,
            is_online_user: false,
            created_at: now.clone(),
            updated_at: now.clone(),
            extra: serde_json::Map::new(),
        };
        self.users.insert_new(user.clone()).await?;

        let entry_id = self
            .entry_logs
            .insert(EntryLog {
                id: None,
                unique_code: reserved.code.clone(),
                admin_id: session.admin_id.clone(),
                source: EntrySource::Onspot,
                created_at: now,
                sync_status: SyncStatus::Pending,
            })
            .await?;

        self.allocator.commit(&reserved).await?;

        self.spawn_immediate_push(entry_id);
        Ok(user)
    }

    /// Unique codes among the given set that already have an entry log,
    /// the read behind the host's "already marked" indicator.
    pub fn marked_codes(&self, unique_codes: &[String]) -> Result<BTreeSet<String>> {
        Ok(self
            .entry_logs
            .list_by_unique_codes(unique_codes)?
            .into_iter()
            .map(|log| log.unique_code)
            .collect())
    }

    /// Unique codes already checked in for the given event.
    pub fn attendance_marked(&self, event_id: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .attendance
            .list_for_event(event_id)?
            .into_iter()
            .map(|att| att.unique_code)
            .collect())
    }

    /// Best-effort immediate flush of one entry log when online. Detached:
    /// the mark already succeeded locally either way.
    fn spawn_immediate_push(&self, entry_id: i64) {
        if !self.connectivity.is_online() {
            return;
        }
        let push = Arc::clone(&self.push);
        tokio::spawn(async move {
            if let Err(err) = push.push_single_entry_log(entry_id, None).await {
                warn!("Immediate push of entry log {entry_id} failed, will sync later: {err}");
            }
        });
    }
}
