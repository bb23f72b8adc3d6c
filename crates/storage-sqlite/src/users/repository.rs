//! Repository for attendee records.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use gatecheck_core::errors::Result;
use gatecheck_core::users::{User, UserRepositoryTrait};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;

use super::model::UserDB;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(UserDB::into_domain).transpose()
    }

    fn find_by_unique_code(&self, unique_code: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .filter(users::unique_code.eq(unique_code))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(UserDB::into_domain).transpose()
    }

    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .filter(users::unique_code.eq_any(unique_codes))
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(UserDB::into_domain).collect()
    }

    async fn insert_new(&self, user: User) -> Result<()> {
        self.writer
            .exec(move |conn| {
                let row = UserDB::from(&user);
                diesel::insert_into(users::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
