//! Shared store handle used by request handlers.
//!
//! # Responsibility
//! - Own the single SQLite connection for the process.
//! - Serialize access to it across concurrent callers.
//! - Close it explicitly at shutdown.
//!
//! # Invariants
//! - A `Store` is constructed once and passed to callers; there is no global.
//! - Closures passed to [`Store::with_conn`] run while the lock is held.

use super::open::{open_db, open_db_in_memory};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Mutex-guarded connection handle with explicit lifecycle.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (and migrates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens (and migrates) an in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `op` with exclusive access to the connection.
    ///
    /// # Errors
    /// - Returns `DbError::Poisoned` (converted into `E`) when a previous
    ///   caller panicked while holding the lock.
    pub fn with_conn<T, E>(&self, op: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let guard = self.conn.lock().map_err(|_| E::from(DbError::Poisoned))?;
        op(&guard)
    }

    /// Flushes and closes the underlying connection.
    pub fn close(self) -> DbResult<()> {
        let conn = self.conn.into_inner().map_err(|_| DbError::Poisoned)?;
        match conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!("event=db_close module=db status=error error={err}");
                Err(err.into())
            }
        }
    }
}
