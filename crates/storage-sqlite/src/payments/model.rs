//! Database model for payments.

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gatecheck_core::errors::{DatabaseError, Error, Result};
use gatecheck_core::payments::Payment;

use crate::convert::{extra_from_db, extra_to_db};

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
#[diesel(primary_key(payment_id))]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct PaymentDB {
    pub payment_id: String,
    pub user_id: String,
    pub event_id: String,
    pub amount: Option<String>,
    pub extra: Option<String>,
}

impl From<&Payment> for PaymentDB {
    fn from(payment: &Payment) -> Self {
        Self {
            payment_id: payment.payment_id.clone(),
            user_id: payment.user_id.clone(),
            event_id: payment.event_id.clone(),
            amount: payment.amount.map(|amount| amount.to_string()),
            extra: extra_to_db(&payment.extra),
        }
    }
}

impl PaymentDB {
    pub fn into_domain(self) -> Result<Payment> {
        let amount = self
            .amount
            .as_deref()
            .map(|raw| {
                raw.parse::<Decimal>().map_err(|e| {
                    Error::Database(DatabaseError::Internal(format!(
                        "Corrupt payment amount '{raw}': {e}"
                    )))
                })
            })
            .transpose()?;
        Ok(Payment {
            extra: extra_from_db(self.extra.as_deref())?,
            payment_id: self.payment_id,
            user_id: self.user_id,
            event_id: self.event_id,
            amount,
        })
    }
}
