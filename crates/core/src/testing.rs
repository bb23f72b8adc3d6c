//! In-memory mock repositories and a scripted API for unit tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::admins::{Admin, AdminRepositoryTrait};
use crate::entries::{
    Attendance, AttendanceRepositoryTrait, EntryLog, EntryLogRepositoryTrait, SyncStatus,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{Event, EventRepositoryTrait};
use crate::sync::{PullBatch, PushOutcome, PushRequest, SyncApi, SyncStateRepositoryTrait};
use crate::users::{User, UserRepositoryTrait};
use crate::winners::{Winner, WinnerRepositoryTrait};

pub fn user_with_code(code: &str) -> User {
    User {
        user_id: format!("u-{code}"),
        unique_code: code.to_string(),
        name: format!("User {code}"),
        email: format!("{code}@example.com"),
        mobile_number: String::new(),
        department: String::new(),
        gender: String::new(),
        year: String::new(),
        college: String::new(),
        is_online_user: true,
        created_at: "2026-03-01T10:00:00+00:00".to_string(),
        updated_at: "2026-03-01T10:00:00+00:00".to_string(),
        extra: serde_json::Map::new(),
    }
}

#[derive(Default)]
pub struct MockAdminRepository {
    admin: Mutex<Option<Admin>>,
}

impl MockAdminRepository {
    pub fn with_admin(admin: Admin) -> Self {
        Self {
            admin: Mutex::new(Some(admin)),
        }
    }

    pub fn clear(&self) {
        *self.admin.lock().expect("lock") = None;
    }
}

#[async_trait]
impl AdminRepositoryTrait for MockAdminRepository {
    fn current(&self) -> Result<Option<Admin>> {
        Ok(self.admin.lock().expect("lock").clone())
    }

    async fn put(&self, admin: Admin) -> Result<()> {
        *self.admin.lock().expect("lock") = Some(admin);
        Ok(())
    }

    async fn commit_code_block(
        &self,
        admin_id: &str,
        value: i64,
        updated_at: String,
    ) -> Result<()> {
        let mut guard = self.admin.lock().expect("lock");
        let admin = guard
            .as_mut()
            .filter(|admin| admin.admin_id == admin_id)
            .ok_or(Error::NoAdmin)?;
        if value > admin.code_block.current_value {
            admin.code_block.current_value = value;
            admin.code_block.updated_at = updated_at;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockUserRepository {
    rows: Mutex<BTreeMap<String, User>>,
}

impl MockUserRepository {
    pub fn seed(&self, user: User) {
        self.rows
            .lock()
            .expect("lock")
            .insert(user.user_id.clone(), user);
    }
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.rows.lock().expect("lock").get(user_id).cloned())
    }

    fn find_by_unique_code(&self, unique_code: &str) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .values()
            .find(|user| user.unique_code == unique_code)
            .cloned())
    }

    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<User>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .values()
            .filter(|user| unique_codes.contains(&user.unique_code))
            .cloned()
            .collect())
    }

    async fn insert_new(&self, user: User) -> Result<()> {
        let mut rows = self.rows.lock().expect("lock");
        if rows.contains_key(&user.user_id) {
            return Err(Error::Database(DatabaseError::DuplicateKey(user.user_id)));
        }
        rows.insert(user.user_id.clone(), user);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockEventRepository {
    rows: Mutex<BTreeMap<String, Event>>,
}

impl MockEventRepository {
    pub fn seed(&self, event: Event) {
        self.rows
            .lock()
            .expect("lock")
            .insert(event.event_id.clone(), event);
    }
}

impl EventRepositoryTrait for MockEventRepository {
    fn get(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.rows.lock().expect("lock").get(event_id).cloned())
    }

    fn list(&self) -> Result<Vec<Event>> {
        Ok(self.rows.lock().expect("lock").values().cloned().collect())
    }
}

#[derive(Default)]
pub struct MockEntryLogRepository {
    rows: Mutex<Vec<EntryLog>>,
    fail_next_insert: AtomicBool,
}

impl MockEntryLogRepository {
    pub async fn seed(&self, log: EntryLog) -> i64 {
        self.insert(log).await.expect("seed insert")
    }

    pub async fn all(&self) -> Vec<EntryLog> {
        self.rows.lock().expect("lock").clone()
    }

    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::Relaxed);
    }

    fn mark_synced_sync(&self, ids: &[i64]) {
        let mut rows = self.rows.lock().expect("lock");
        for row in rows.iter_mut() {
            if row.id.is_some_and(|id| ids.contains(&id)) {
                row.sync_status = SyncStatus::Synced;
            }
        }
    }
}

#[async_trait]
impl EntryLogRepositoryTrait for MockEntryLogRepository {
    fn get(&self, id: i64) -> Result<Option<EntryLog>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|row| row.id == Some(id))
            .cloned())
    }

    fn list_pending(&self) -> Result<Vec<EntryLog>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| row.sync_status == SyncStatus::Pending)
            .cloned()
            .collect())
    }

    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<EntryLog>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| unique_codes.contains(&row.unique_code))
            .cloned()
            .collect())
    }

    async fn insert(&self, mut log: EntryLog) -> Result<i64> {
        if self.fail_next_insert.swap(false, Ordering::Relaxed) {
            return Err(Error::Database(DatabaseError::Internal(
                "simulated insert failure".to_string(),
            )));
        }
        let mut rows = self.rows.lock().expect("lock");
        let id = rows.len() as i64 + 1;
        log.id = Some(id);
        rows.push(log);
        Ok(id)
    }

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()> {
        self.mark_synced_sync(&ids);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAttendanceRepository {
    rows: Mutex<Vec<Attendance>>,
}

impl MockAttendanceRepository {
    pub async fn seed(&self, attendance: Attendance) -> i64 {
        self.insert(attendance).await.expect("seed insert")
    }

    pub async fn all(&self) -> Vec<Attendance> {
        self.rows.lock().expect("lock").clone()
    }

    fn mark_synced_sync(&self, ids: &[i64]) {
        let mut rows = self.rows.lock().expect("lock");
        for row in rows.iter_mut() {
            if row.id.is_some_and(|id| ids.contains(&id)) {
                row.sync_status = SyncStatus::Synced;
            }
        }
    }
}

#[async_trait]
impl AttendanceRepositoryTrait for MockAttendanceRepository {
    fn list_pending(&self) -> Result<Vec<Attendance>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| row.sync_status == SyncStatus::Pending)
            .cloned()
            .collect())
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Attendance>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| row.event_id == event_id)
            .cloned()
            .collect())
    }

    fn is_marked(&self, event_id: &str, unique_code: &str) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .any(|row| row.event_id == event_id && row.unique_code == unique_code))
    }

    async fn insert(&self, mut attendance: Attendance) -> Result<i64> {
        let mut rows = self.rows.lock().expect("lock");
        let id = rows.len() as i64 + 1;
        attendance.id = Some(id);
        rows.push(attendance);
        Ok(id)
    }

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()> {
        self.mark_synced_sync(&ids);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockWinnerRepository {
    rows: Mutex<Vec<Winner>>,
}

#[async_trait]
impl WinnerRepositoryTrait for MockWinnerRepository {
    fn list_all(&self) -> Result<Vec<Winner>> {
        Ok(self.rows.lock().expect("lock").clone())
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Winner>> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|row| row.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn replace_for_event(&self, event_id: &str, winners: Vec<Winner>) -> Result<()> {
        let mut rows = self.rows.lock().expect("lock");
        rows.retain(|row| row.event_id != event_id);
        rows.extend(winners);
        Ok(())
    }
}

/// Sync-state mock. When linked to entry-log/attendance mocks it flips
/// their statuses on `reconcile_push`, the way the SQLite repository
/// updates all tables in one transaction.
#[derive(Default)]
pub struct MockSyncStateRepository {
    last_pulled: Mutex<Option<String>>,
    last_pushed: Mutex<Option<String>>,
    batches: Mutex<Vec<PullBatch>>,
    users: Mutex<BTreeMap<String, User>>,
    entry_logs: Mutex<Option<Arc<MockEntryLogRepository>>>,
    attendance: Mutex<Option<Arc<MockAttendanceRepository>>>,
}

impl MockSyncStateRepository {
    pub fn link(
        &self,
        entry_logs: Arc<MockEntryLogRepository>,
        attendance: Arc<MockAttendanceRepository>,
    ) {
        *self.entry_logs.lock().expect("lock") = Some(entry_logs);
        *self.attendance.lock().expect("lock") = Some(attendance);
    }

    pub fn applied_batches(&self) -> Vec<PullBatch> {
        self.batches.lock().expect("lock").clone()
    }

    /// Distinct user rows after all applied batches (primary-key upsert).
    pub fn user_cardinality(&self) -> usize {
        self.users.lock().expect("lock").len()
    }
}

#[async_trait]
impl SyncStateRepositoryTrait for MockSyncStateRepository {
    fn last_pulled_at(&self) -> Result<Option<String>> {
        Ok(self.last_pulled.lock().expect("lock").clone())
    }

    fn last_pushed_at(&self) -> Result<Option<String>> {
        Ok(self.last_pushed.lock().expect("lock").clone())
    }

    async fn apply_pull(&self, batch: PullBatch) -> Result<()> {
        {
            let mut users = self.users.lock().expect("lock");
            for user in &batch.users {
                users.insert(user.user_id.clone(), user.clone());
            }
        }
        *self.last_pulled.lock().expect("lock") = Some(batch.timestamp.clone());
        self.batches.lock().expect("lock").push(batch);
        Ok(())
    }

    async fn reconcile_push(
        &self,
        synced_entry_ids: Vec<i64>,
        synced_attendance_ids: Vec<i64>,
        pushed_at: String,
    ) -> Result<()> {
        if let Some(entry_logs) = self.entry_logs.lock().expect("lock").as_ref() {
            entry_logs.mark_synced_sync(&synced_entry_ids);
        }
        if let Some(attendance) = self.attendance.lock().expect("lock").as_ref() {
            attendance.mark_synced_sync(&synced_attendance_ids);
        }
        *self.last_pushed.lock().expect("lock") = Some(pushed_at);
        Ok(())
    }
}

/// Scripted [`SyncApi`]: responses are queued ahead of time and every
/// request is recorded for assertions. An unscripted call fails like a
/// dead network.
#[derive(Default)]
pub struct ScriptedSyncApi {
    pulls: Mutex<VecDeque<Result<PullBatch>>>,
    pushes: Mutex<VecDeque<Result<PushOutcome>>>,
    pull_checkpoints: Mutex<Vec<Option<String>>>,
    push_requests: Mutex<Vec<PushRequest>>,
}

impl ScriptedSyncApi {
    pub fn enqueue_pull(&self, response: Result<PullBatch>) {
        self.pulls.lock().expect("lock").push_back(response);
    }

    pub fn enqueue_push(&self, response: Result<PushOutcome>) {
        self.pushes.lock().expect("lock").push_back(response);
    }

    pub fn pull_checkpoints(&self) -> Vec<Option<String>> {
        self.pull_checkpoints.lock().expect("lock").clone()
    }

    pub fn push_requests(&self) -> Vec<PushRequest> {
        self.push_requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SyncApi for ScriptedSyncApi {
    async fn pull(
        &self,
        _auth_token: Option<&str>,
        last_pulled_at: Option<&str>,
    ) -> Result<PullBatch> {
        self.pull_checkpoints
            .lock()
            .expect("lock")
            .push(last_pulled_at.map(str::to_string));
        self.pulls
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Error::network("no scripted pull response")))
    }

    async fn push(&self, _auth_token: Option<&str>, request: &PushRequest) -> Result<PushOutcome> {
        self.push_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        self.pushes
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(Error::network("no scripted push response")))
    }
}
