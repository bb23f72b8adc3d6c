//! Single-writer actor for all database mutations.
//!
//! SQLite allows one writer at a time; funnelling every mutation through
//! one dedicated thread removes lock contention and gives each job an
//! immediate transaction, so a job touching several tables commits or
//! rolls back as a unit.

use std::thread;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::error;
use tokio::sync::{mpsc, oneshot};

use gatecheck_core::errors::{DatabaseError, Error, Result};

use crate::errors::StorageError;

type Job = Box<dyn FnOnce(&mut SqliteConnection) + Send + 'static>;

/// Handle to the writer thread. Cheap to clone; held by every repository.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::UnboundedSender<Job>,
}

impl WriteHandle {
    /// Run `job` inside an immediate transaction on the writer thread.
    ///
    /// A `Err` return from the job rolls the whole transaction back and
    /// is handed back to the caller unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let boxed: Job = Box::new(move |conn| {
            let result = conn
                .immediate_transaction::<T, StorageError, _>(|tx| job(tx).map_err(StorageError::App))
                .map_err(Error::from);
            let _ = done_tx.send(result);
        });

        self.tx.send(boxed).map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Database writer has shut down".to_string(),
            ))
        })?;
        done_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "Database writer dropped the job".to_string(),
            ))
        })?
    }
}

/// Spawn the writer thread over its own clone of the connection pool.
pub fn spawn_writer(pool: Pool<ConnectionManager<SqliteConnection>>) -> WriteHandle {
    let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

    thread::Builder::new()
        .name("gatecheck-db-writer".to_string())
        .spawn(move || {
            while let Some(job) = rx.blocking_recv() {
                match pool.get() {
                    Ok(mut conn) => job(&mut conn),
                    // Dropping the job cancels its oneshot; the caller
                    // sees a writer error instead of hanging.
                    Err(err) => error!("Writer could not check out a connection: {err}"),
                }
            }
        })
        .expect("Failed to spawn database writer thread");

    WriteHandle { tx }
}
