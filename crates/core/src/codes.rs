//! Unique-code allocation against the admin's reserved range.
//!
//! Allocation is split into `reserve` (pure read + validation) and
//! `commit` (the counter write). The registration flow commits only after
//! the dependent user and entry-log rows exist, so a crash in between
//! leaves a gap in the issued sequence, never a duplicate code.

use std::sync::Arc;

use chrono::Utc;

use crate::admins::AdminRepositoryTrait;
use crate::errors::{Error, Result};

/// A code reserved from the admin's block but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedCode {
    pub admin_id: String,
    pub value: i64,
    pub code: String,
}

/// Issues monotonically increasing unique codes from the logged-in
/// admin's [`crate::admins::CodeBlock`].
///
/// Not safe for concurrent callers on the same device: the surrounding
/// flow is single in-flight (the host disables the action while one
/// registration runs). Cross-device collisions are prevented structurally
/// by disjoint server-assigned ranges.
pub struct CodeAllocator {
    admins: Arc<dyn AdminRepositoryTrait>,
}

impl CodeAllocator {
    pub fn new(admins: Arc<dyn AdminRepositoryTrait>) -> Self {
        Self { admins }
    }

    /// Compute the next code without mutating the block.
    ///
    /// Fails with [`Error::NoAdmin`] when no admin is stored locally and
    /// with [`Error::CodeBlockExhausted`] when the range is used up; the
    /// latter is a hard stop; the operator must re-sync for a new range.
    pub fn reserve(&self) -> Result<ReservedCode> {
        let admin = self.admins.current()?.ok_or(Error::NoAdmin)?;
        let block = &admin.code_block;

        let next = block.effective_current() + 1;
        if next < block.range_start || next > block.range_end {
            return Err(Error::CodeBlockExhausted {
                range_start: block.range_start,
                range_end: block.range_end,
                attempted: next,
            });
        }

        Ok(ReservedCode {
            admin_id: admin.admin_id,
            value: next,
            code: next.to_string(),
        })
    }

    /// Persist a reserved value as the block's `current_value`.
    ///
    /// Call only after the records carrying the code exist; the repository
    /// write is monotonic and never moves the counter backwards.
    pub async fn commit(&self, reserved: &ReservedCode) -> Result<()> {
        self.admins
            .commit_code_block(&reserved.admin_id, reserved.value, Utc::now().to_rfc3339())
            .await
    }
}
