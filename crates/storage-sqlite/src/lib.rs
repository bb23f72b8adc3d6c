//! SQLite implementation of the gatecheck local store.
//!
//! Reads go straight to an r2d2 connection pool; every mutation funnels
//! through a single write actor that wraps each job in an immediate
//! transaction, so multi-table sync steps are all-or-nothing.
//!
//! Opening the store (`db::init` + `db::run_migrations` + `db::create_pool`)
//! is fatal on failure: callers must not proceed to sync or writes without
//! a healthy database.

pub mod admins;
pub(crate) mod convert;
pub mod db;
pub mod entries;
pub mod enrollments;
pub mod errors;
pub mod events;
pub mod payments;
pub mod schema;
pub mod sync;
pub mod users;
pub mod winners;

#[cfg(test)]
pub(crate) mod test_support;

pub use db::{create_pool, get_connection, init, run_migrations, DbPool, WriteHandle};
pub use errors::StorageError;
