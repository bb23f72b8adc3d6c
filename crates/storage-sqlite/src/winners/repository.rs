//! Repository for winners.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use gatecheck_core::errors::Result;
use gatecheck_core::winners::{Winner, WinnerRepositoryTrait};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::winners;

use super::model::WinnerDB;

pub struct WinnerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WinnerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl WinnerRepositoryTrait for WinnerRepository {
    fn list_all(&self) -> Result<Vec<Winner>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = winners::table
            .order((winners::event_id.asc(), winners::rank.asc()))
            .load::<WinnerDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(WinnerDB::into_domain).collect()
    }

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Winner>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = winners::table
            .filter(winners::event_id.eq(event_id))
            .order(winners::rank.asc())
            .load::<WinnerDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(WinnerDB::into_domain).collect()
    }

    async fn replace_for_event(&self, event_id: &str, replacement: Vec<Winner>) -> Result<()> {
        let event_id = event_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(winners::table.filter(winners::event_id.eq(&event_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let rows = replacement
                    .iter()
                    .map(WinnerDB::from_domain)
                    .collect::<Result<Vec<_>>>()?;
                diesel::insert_into(winners::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
