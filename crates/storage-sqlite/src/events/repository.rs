//! Repository for the event catalog.
//!
//! Events are server-owned: the only writer is the pull transaction in
//! the sync repository, so this repository is read-only.

use std::sync::Arc;

use diesel::prelude::*;

use gatecheck_core::errors::Result;
use gatecheck_core::events::{Event, EventRepositoryTrait};

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::events;

use super::model::EventDB;

pub struct EventRepository {
    pool: Arc<DbPool>,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl EventRepositoryTrait for EventRepository {
    fn get(&self, event_id: &str) -> Result<Option<Event>> {
        let mut conn = get_connection(&self.pool)?;
        let row = events::table
            .find(event_id)
            .first::<EventDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(EventDB::into_domain).transpose()
    }

    fn list(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = events::table
            .load::<EventDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(EventDB::into_domain).collect()
    }
}
