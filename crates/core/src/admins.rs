//! The logged-in operator and their reserved code range.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A numeric range of unique codes reserved for one admin by the server.
///
/// Invariants: `range_start - 1 <= current_value <= range_end`;
/// `current_value` never decreases. `current_value + 1` is the next code
/// to issue; issuance fails (never wraps) at `range_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub id: String,
    pub admin_id: String,
    pub range_start: i64,
    pub range_end: i64,
    pub current_value: i64,
    pub updated_at: String,
}

impl CodeBlock {
    /// Last issued value, treating a never-used block (`current_value`
    /// below the range) as `range_start - 1`.
    pub fn effective_current(&self) -> i64 {
        self.current_value.max(self.range_start - 1)
    }

    /// Codes still available in this block.
    pub fn remaining(&self) -> i64 {
        (self.range_end - self.effective_current()).max(0)
    }
}

/// The operator signed in on this device. Created at login, mutated
/// locally only by the code allocator; the server remains the source of
/// truth for the range and a fresh block arrives with the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    pub code_block: CodeBlock,
}

#[async_trait]
pub trait AdminRepositoryTrait: Send + Sync {
    /// The single locally stored admin, if any.
    fn current(&self) -> Result<Option<Admin>>;

    /// Insert-or-replace the admin record (login flow).
    async fn put(&self, admin: Admin) -> Result<()>;

    /// Persist an issued code value onto the admin's block, refreshing
    /// `updated_at`. Must never move `current_value` backwards.
    async fn commit_code_block(&self, admin_id: &str, value: i64, updated_at: String)
        -> Result<()>;
}
