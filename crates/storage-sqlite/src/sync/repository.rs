//! Repository for sync checkpoints and cycle reconciliation.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use gatecheck_core::entries::SyncStatus;
use gatecheck_core::errors::Result;
use gatecheck_core::sync::{
    PullBatch, SyncStateRepositoryTrait, META_LAST_PULLED_AT, META_LAST_PUSHED_AT,
};

use crate::convert::enum_to_db;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::enrollments::EnrollmentDB;
use crate::errors::StorageError;
use crate::events::EventDB;
use crate::payments::PaymentDB;
use crate::schema::{attendance, enrollments, entry_logs, events, payments, sync_meta, users};
use crate::users::UserDB;

#[derive(Queryable, Identifiable, Insertable, Debug, Clone)]
#[diesel(primary_key(key))]
#[diesel(table_name = crate::schema::sync_meta)]
struct SyncMetaDB {
    key: String,
    value: Option<String>,
}

fn put_meta(conn: &mut SqliteConnection, meta_key: &str, meta_value: &str) -> Result<()> {
    let row = SyncMetaDB {
        key: meta_key.to_string(),
        value: Some(meta_value.to_string()),
    };
    diesel::insert_into(sync_meta::table)
        .values(&row)
        .on_conflict(sync_meta::key)
        .do_update()
        .set(sync_meta::value.eq(&row.value))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

pub struct SyncStateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SyncStateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn get_meta(&self, meta_key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let row = sync_meta::table
            .find(meta_key)
            .first::<SyncMetaDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.and_then(|r| r.value))
    }
}

#[async_trait]
impl SyncStateRepositoryTrait for SyncStateRepository {
    fn last_pulled_at(&self) -> Result<Option<String>> {
        self.get_meta(META_LAST_PULLED_AT)
    }

    fn last_pushed_at(&self) -> Result<Option<String>> {
        self.get_meta(META_LAST_PUSHED_AT)
    }

    /// Upsert every entity in the batch and advance the checkpoint, all in
    /// one write-actor transaction. A replayed batch is a no-op beyond
    /// refreshing the same rows; a failed batch leaves the checkpoint (and
    /// everything else) untouched.
    async fn apply_pull(&self, batch: PullBatch) -> Result<()> {
        self.writer
            .exec(move |conn| {
                for user in &batch.users {
                    let row = UserDB::from(user);
                    diesel::insert_into(users::table)
                        .values(&row)
                        .on_conflict(users::user_id)
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                for event in &batch.events {
                    let row = EventDB::from(event);
                    diesel::insert_into(events::table)
                        .values(&row)
                        .on_conflict(events::event_id)
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                for enrollment in &batch.enrollments {
                    let row = EnrollmentDB::from(enrollment);
                    diesel::insert_into(enrollments::table)
                        .values(&row)
                        .on_conflict(enrollments::enrollment_id)
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                for payment in &batch.payments {
                    let row = PaymentDB::from(payment);
                    diesel::insert_into(payments::table)
                        .values(&row)
                        .on_conflict(payments::payment_id)
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                put_meta(conn, META_LAST_PULLED_AT, &batch.timestamp)
            })
            .await
    }

    /// Flip acknowledged rows to `synced` and stamp `lastPushedAt`, in one
    /// write-actor transaction.
    async fn reconcile_push(
        &self,
        synced_entry_ids: Vec<i64>,
        synced_attendance_ids: Vec<i64>,
        pushed_at: String,
    ) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let synced = enum_to_db(&SyncStatus::Synced)?;
                if !synced_entry_ids.is_empty() {
                    diesel::update(
                        entry_logs::table.filter(entry_logs::id.eq_any(&synced_entry_ids)),
                    )
                    .set(entry_logs::sync_status.eq(&synced))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                if !synced_attendance_ids.is_empty() {
                    diesel::update(
                        attendance::table.filter(attendance::id.eq_any(&synced_attendance_ids)),
                    )
                    .set(attendance::sync_status.eq(&synced))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }

                put_meta(conn, META_LAST_PUSHED_AT, &pushed_at)
            })
            .await
    }
}
