//! Error types shared across the gatecheck crates.

use thiserror::Error;

/// Result type alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error taxonomy.
///
/// Fatal/session-level (`NoAdmin`), business-rule (`CodeBlockExhausted`,
/// duplicate keys under `Database`), and recoverable (`Network`) failures
/// are distinct variants so callers can decide retry policy; the core never
/// retries on its own.
#[derive(Debug, Error)]
pub enum Error {
    /// Local store failure.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Transport or backend failure during a sync round trip.
    #[error("Network error: {0}")]
    Network(String),

    /// No admin record exists locally; the operator must re-authenticate.
    #[error("No admin session found; please log in again")]
    NoAdmin,

    /// The admin's reserved code range is used up. Re-sync to obtain a
    /// fresh range from the server.
    #[error("Code block exhausted: range {range_start}..={range_end}, attempted {attempted}")]
    CodeBlockExhausted {
        range_start: i64,
        range_end: i64,
        attempted: i64,
    },

    /// Input rejected by a business rule (e.g. attendance already marked).
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage-level failures, surfaced by the storage crate.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(String),

    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// True when retrying the same operation later could succeed without
    /// any operator intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
