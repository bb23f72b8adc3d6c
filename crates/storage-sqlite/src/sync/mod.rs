//! SQLite persistence for sync state: the checkpoint register and the
//! atomic multi-table steps of the pull/push cycles.

mod repository;

pub use repository::SyncStateRepository;
