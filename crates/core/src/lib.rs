//! Gatecheck core: domain models and services for offline-first event
//! gate-entry management.
//!
//! Storage and the backend HTTP API are consumed through traits defined
//! here (`*RepositoryTrait`, [`sync::SyncApi`]); the SQLite store and the
//! reqwest client live in sibling crates.

pub mod admins;
pub mod codes;
pub mod connectivity;
pub mod entries;
pub mod enrollments;
pub mod errors;
pub mod events;
pub mod payments;
pub mod session;
pub mod sync;
pub mod users;
pub mod winners;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
