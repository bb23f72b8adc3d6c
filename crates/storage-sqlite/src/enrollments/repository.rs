//! Repository for enrollments. Server-owned, read-only locally.

use std::sync::Arc;

use diesel::prelude::*;

use gatecheck_core::enrollments::Enrollment;
use gatecheck_core::errors::Result;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::enrollments;

use super::model::EnrollmentDB;

pub struct EnrollmentRepository {
    pool: Arc<DbPool>,
}

impl EnrollmentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Everyone enrolled in the given event (the event roster).
    pub fn list_for_event(&self, event_id: &str) -> Result<Vec<Enrollment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = enrollments::table
            .filter(enrollments::event_id.eq(event_id))
            .load::<EnrollmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(EnrollmentDB::into_domain).collect()
    }

    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Enrollment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = enrollments::table
            .filter(enrollments::user_id.eq(user_id))
            .load::<EnrollmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(EnrollmentDB::into_domain).collect()
    }
}
