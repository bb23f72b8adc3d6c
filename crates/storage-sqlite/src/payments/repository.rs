//! Repository for payments. Server-owned, read-only locally.

use std::sync::Arc;

use diesel::prelude::*;

use gatecheck_core::errors::Result;
use gatecheck_core::payments::Payment;

use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::payments;

use super::model::PaymentDB;

pub struct PaymentRepository {
    pool: Arc<DbPool>,
}

impl PaymentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments::table
            .filter(payments::user_id.eq(user_id))
            .load::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(PaymentDB::into_domain).collect()
    }

    pub fn list_for_event(&self, event_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments::table
            .filter(payments::event_id.eq(event_id))
            .load::<PaymentDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(PaymentDB::into_domain).collect()
    }
}
