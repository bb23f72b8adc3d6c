//! HTTP client for the gatecheck sync backend.
//!
//! Implements [`gatecheck_core::sync::SyncApi`] over the two REST
//! endpoints the backend exposes (`/sync/pull`, `/sync/push`).

mod client;
pub mod error;
pub mod types;

pub use client::{SyncApiClient, API_URL_ENV};
pub use error::{ApiRetryClass, SyncClientError};
