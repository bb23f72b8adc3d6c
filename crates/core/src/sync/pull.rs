//! Pull cycle: server truth down into the local store.

use std::sync::Arc;

use log::{debug, info};

use crate::errors::Result;
use crate::sync::{PullCounts, SyncApi, SyncStateRepositoryTrait};

/// Fetches server-side deltas since the last checkpoint and merges them
/// into the local store.
///
/// Replaying the same response is a no-op (primary-key upsert), so a pull
/// may be retried freely. Re-entrancy is not guarded here; the host
/// serializes triggers by disabling the control while one is in flight.
pub struct PullSynchronizer {
    state: Arc<dyn SyncStateRepositoryTrait>,
    api: Arc<dyn SyncApi>,
}

impl PullSynchronizer {
    pub fn new(state: Arc<dyn SyncStateRepositoryTrait>, api: Arc<dyn SyncApi>) -> Self {
        Self { state, api }
    }

    /// Run one pull cycle, returning per-entity received counts.
    ///
    /// Any failure aborts the whole cycle before the checkpoint advances:
    /// the next attempt resumes from the same last-good checkpoint and
    /// re-fetches the same or a superset of the data.
    pub async fn pull(&self, auth_token: Option<&str>) -> Result<PullCounts> {
        let last_pulled_at = self.state.last_pulled_at()?;
        debug!(
            "Starting pull, checkpoint: {}",
            last_pulled_at.as_deref().unwrap_or("none (full resync)")
        );

        let mut batch = self.api.pull(auth_token, last_pulled_at.as_deref()).await?;

        // Normalize display names once at ingestion; readers never
        // re-derive them from the side-map.
        for event in &mut batch.events {
            event.normalize_name();
        }

        let counts = PullCounts::of(&batch);
        self.state.apply_pull(batch).await?;

        info!(
            "Pull complete: {} users, {} events, {} enrollments, {} payments",
            counts.users, counts.events, counts.enrollments, counts.payments
        );
        Ok(counts)
    }
}
