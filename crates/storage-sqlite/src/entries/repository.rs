//! Repositories for entry logs and attendance.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;

use gatecheck_core::entries::{
    Attendance, AttendanceRepositoryTrait, EntryLog, EntryLogRepositoryTrait, SyncStatus,
};
use gatecheck_core::errors::Result;

use crate::convert::enum_to_db;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{attendance, entry_logs};

use super::model::{AttendanceDB, EntryLogDB, NewAttendanceDB, NewEntryLogDB};

pub struct EntryLogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EntryLogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl EntryLogRepositoryTrait for EntryLogRepository {
    fn get(&self, id: i64) -> Result<Option<EntryLog>> {
        let mut conn = get_connection(&self.pool)?;
        let row = entry_logs::table
            .find(id)
            .first::<EntryLogDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(EntryLogDB::into_domain).transpose()
    }

    fn list_pending(&self) -> Result<Vec<EntryLog>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = entry_logs::table
            .filter(entry_logs::sync_status.eq(enum_to_db(&SyncStatus::Pending)?))
            .order(entry_logs::id.asc())
            .load::<EntryLogDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(EntryLogDB::into_domain).collect()
    }

    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<EntryLog>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = entry_logs::table
            .filter(entry_logs::unique_code.eq_any(unique_codes))
            .order(entry_logs::id.asc())
            .load::<EntryLogDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(EntryLogDB::into_domain).collect()
    }

    async fn insert(&self, log: EntryLog) -> Result<i64> {
        self.writer
            .exec(move |conn| {
                let row = NewEntryLogDB::from_domain(&log)?;
                let id = diesel::insert_into(entry_logs::table)
                    .values(&row)
                    .returning(entry_logs::id)
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                Ok(id)
            })
            .await
    }

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.writer
            .exec(move |conn| {
                diesel::update(entry_logs::table.filter(entry_logs::id.eq_any(ids)))
                    .set(entry_logs::sync_status.eq(enum_to_db(&SyncStatus::Synced)?))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

pub struct AttendanceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AttendanceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AttendanceRepositoryTrait for AttendanceRepository {
    fn list_pending(&self) -> Result<Vec<Attendance>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = attendance::table
            .filter(attendance::sync_status.eq(enum_to_db(&SyncStatus::Pending)?))
            .order(attendance::id.asc())
            .load::<AttendanceDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(AttendanceDB::into_domain).collect()
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Attendance>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = attendance::table
            .filter(attendance::event_id.eq(event_id))
            .order(attendance::id.asc())
            .load::<AttendanceDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(AttendanceDB::into_domain).collect()
    }

    fn is_marked(&self, event_id: &str, unique_code: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = attendance::table
            .filter(attendance::event_id.eq(event_id))
            .filter(attendance::unique_code.eq(unique_code))
            .select(count_star())
            .first(&mut conn)
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    async fn insert(&self, record: Attendance) -> Result<i64> {
        self.writer
            .exec(move |conn| {
                let row = NewAttendanceDB::from_domain(&record)?;
                let id = diesel::insert_into(attendance::table)
                    .values(&row)
                    .returning(attendance::id)
                    .get_result::<i64>(conn)
                    .map_err(StorageError::from)?;
                Ok(id)
            })
            .await
    }

    async fn mark_synced(&self, ids: Vec<i64>) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        self.writer
            .exec(move |conn| {
                diesel::update(attendance::table.filter(attendance::id.eq_any(ids)))
                    .set(attendance::sync_status.eq(enum_to_db(&SyncStatus::Synced)?))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
