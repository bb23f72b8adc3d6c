//! Database model for winners.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use gatecheck_core::errors::Result;
use gatecheck_core::winners::Winner;

use crate::convert::{enum_from_db, enum_to_db};

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Debug,
    Clone,
    Serialize,
    Deserialize,
)]
#[diesel(primary_key(winner_id))]
#[diesel(table_name = crate::schema::winners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WinnerDB {
    pub winner_id: String,
    pub event_id: String,
    pub user_id: String,
    pub rank: i32,
    pub created_at: String,
    pub sync_status: String,
}

impl WinnerDB {
    pub fn from_domain(winner: &Winner) -> Result<Self> {
        Ok(Self {
            winner_id: winner.winner_id.clone(),
            event_id: winner.event_id.clone(),
            user_id: winner.user_id.clone(),
            rank: winner.rank,
            created_at: winner.created_at.clone(),
            sync_status: enum_to_db(&winner.sync_status)?,
        })
    }

    pub fn into_domain(self) -> Result<Winner> {
        Ok(Winner {
            winner_id: self.winner_id,
            event_id: self.event_id,
            user_id: self.user_id,
            rank: self.rank,
            created_at: self.created_at,
            sync_status: enum_from_db(&self.sync_status)?,
        })
    }
}
