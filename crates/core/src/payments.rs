//! Payment records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment by a user for an event. Server-owned; only ever written
/// locally by pull. `amount` is absent for fee schedules the backend
/// keeps implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
