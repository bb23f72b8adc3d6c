//! Bidirectional synchronization with the backend.
//!
//! [`PullSynchronizer`] brings server-owned entities down since the last
//! checkpoint; [`PushSynchronizer`] uploads client-created rows and
//! reconciles their status. Both consume the backend through the
//! [`SyncApi`] trait, implemented by the sync-client crate.

mod model;
mod pull;
mod push;

pub use model::*;
pub use pull::*;
pub use push::*;
