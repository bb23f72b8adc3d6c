//! Attendee identity records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// An attendee, either pre-registered online or created on the spot at the
/// gate. Server-owned once synced; the fixed fields below are what the
/// client understands, everything else the server sends rides along in
/// `extra` and is written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub unique_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub is_online_user: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Details captured at the gate for a walk-in registration. The unique
/// code and record id are assigned by the registration flow, not the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWalkInUser {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub department: String,
    pub gender: String,
    pub year: String,
    pub college: String,
}

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get(&self, user_id: &str) -> Result<Option<User>>;

    fn find_by_unique_code(&self, unique_code: &str) -> Result<Option<User>>;

    /// Users whose `unique_code` is in the given set, used to assemble the
    /// push payload for pending entry/attendance rows.
    fn list_by_unique_codes(&self, unique_codes: &[String]) -> Result<Vec<User>>;

    /// Insert-only; fails with a duplicate-key error when `user_id`
    /// already exists.
    async fn insert_new(&self, user: User) -> Result<()>;
}
