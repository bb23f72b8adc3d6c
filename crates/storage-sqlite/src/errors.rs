//! Storage error type and its mapping onto the core taxonomy.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use gatecheck_core::errors::{DatabaseError, Error};

/// Failures inside the SQLite layer. Converted to the core error type at
/// the crate boundary so callers never see diesel types.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database query failed: {0}")]
    Query(#[from] DieselError),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database migration failed: {0}")]
    Migration(String),

    /// A domain error raised inside a write-actor transaction, carried
    /// through so the transaction rolls back and the original error
    /// reaches the caller.
    #[error(transparent)]
    App(#[from] Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Query(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::DuplicateKey(info.message().to_string())),
            StorageError::Query(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("record not found".to_string()))
            }
            StorageError::Query(other) => {
                Error::Database(DatabaseError::Internal(other.to_string()))
            }
            StorageError::Pool(pool) => {
                Error::Database(DatabaseError::PoolExhausted(pool.to_string()))
            }
            StorageError::Migration(message) => Error::Database(DatabaseError::Internal(message)),
            StorageError::App(inner) => inner,
        }
    }
}
