//! Repository for the admin record.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use gatecheck_core::admins::{Admin, AdminRepositoryTrait};
use gatecheck_core::errors::{Error, Result};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::admins;

use super::model::AdminDB;

pub struct AdminRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AdminRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AdminRepositoryTrait for AdminRepository {
    fn current(&self) -> Result<Option<Admin>> {
        let mut conn = get_connection(&self.pool)?;
        let row = admins::table
            .first::<AdminDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Admin::from))
    }

    async fn put(&self, admin: Admin) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let row = AdminDB::from(&admin);
                // One admin per device: a fresh login replaces whatever
                // operator was stored before.
                diesel::delete(admins::table.filter(admins::admin_id.ne(&row.admin_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::insert_into(admins::table)
                    .values(&row)
                    .on_conflict(admins::admin_id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn commit_code_block(
        &self,
        admin_id: &str,
        value: i64,
        updated_at: String,
    ) -> Result<()> {
        let admin_id = admin_id.to_string();
        self.writer
            .exec(move |conn| {
                let row = admins::table
                    .find(&admin_id)
                    .first::<AdminDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                let Some(row) = row else {
                    return Err(Error::NoAdmin);
                };

                // Monotonic: never move the issued counter backwards.
                if value > row.code_current_value {
                    diesel::update(admins::table.find(&admin_id))
                        .set((
                            admins::code_current_value.eq(value),
                            admins::code_updated_at.eq(updated_at),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}
