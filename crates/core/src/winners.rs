//! Event winners: declaration and enriched listing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entries::SyncStatus;
use crate::errors::{Error, Result};
use crate::events::{Event, EventRepositoryTrait};
use crate::session::AdminSession;
use crate::users::{User, UserRepositoryTrait};

/// A declared winner for an event. Client-created; re-declaring winners
/// for an event replaces the whole prior set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub winner_id: String,
    pub event_id: String,
    pub user_id: String,
    pub rank: i32,
    pub created_at: String,
    pub sync_status: SyncStatus,
}

/// One rank assignment in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerDeclaration {
    pub rank: i32,
    pub user_id: String,
}

/// A winner joined with its user and event for display.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedWinner {
    pub winner: Winner,
    pub user: Option<User>,
    pub event: Option<Event>,
}

#[async_trait]
pub trait WinnerRepositoryTrait: Send + Sync {
    fn list_all(&self) -> Result<Vec<Winner>>;

    fn list_for_event(&self, event_id: &str) -> Result<Vec<Winner>>;

    /// Delete every winner row for the event, then insert the new set,
    /// in one transaction. Replacement, never a merge.
    async fn replace_for_event(&self, event_id: &str, winners: Vec<Winner>) -> Result<()>;
}

/// Winner declaration and lookup.
pub struct WinnerService {
    winners: Arc<dyn WinnerRepositoryTrait>,
    users: Arc<dyn UserRepositoryTrait>,
    events: Arc<dyn EventRepositoryTrait>,
}

impl WinnerService {
    pub fn new(
        winners: Arc<dyn WinnerRepositoryTrait>,
        users: Arc<dyn UserRepositoryTrait>,
        events: Arc<dyn EventRepositoryTrait>,
    ) -> Self {
        Self {
            winners,
            users,
            events,
        }
    }

    /// Declare the winners of an event, replacing any previous
    /// declaration for it.
    pub async fn declare_winners(
        &self,
        _session: &AdminSession,
        event_id: &str,
        declarations: Vec<WinnerDeclaration>,
    ) -> Result<Vec<Winner>> {
        if declarations.is_empty() {
            return Err(Error::validation("winner declaration cannot be empty"));
        }
        for declaration in &declarations {
            if declaration.rank < 1 {
                return Err(Error::validation(format!(
                    "winner rank must be positive, got {}",
                    declaration.rank
                )));
            }
        }

        let now = Utc::now().to_rfc3339();
        let winners: Vec<Winner> = declarations
            .into_iter()
            .map(|declaration| Winner {
                winner_id: Uuid::new_v4().to_string(),
                event_id: event_id.to_string(),
                user_id: declaration.user_id,
                rank: declaration.rank,
                created_at: now.clone(),
                sync_status: SyncStatus::Pending,
            })
            .collect();

        self.winners
            .replace_for_event(event_id, winners.clone())
            .await?;
        Ok(winners)
    }

    pub fn list_for_event(&self, event_id: &str) -> Result<Vec<Winner>> {
        self.winners.list_for_event(event_id)
    }

    /// Winners joined with user and event records, optionally filtered to
    /// one event. Event display names were normalized at pull time.
    pub fn list_enriched(&self, event_filter: Option<&str>) -> Result<Vec<EnrichedWinner>> {
        let winners = match event_filter {
            Some(event_id) => self.winners.list_for_event(event_id)?,
            None => self.winners.list_all()?,
        };

        winners
            .into_iter()
            .map(|winner| {
                let user = self.users.get(&winner.user_id)?;
                let event = self.events.get(&winner.event_id)?;
                Ok(EnrichedWinner {
                    winner,
                    user,
                    event,
                })
            })
            .collect()
    }
}
