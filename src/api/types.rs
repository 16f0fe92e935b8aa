//! Shared state for the portal API layer.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::api::error::ApiError;

/// Shared context for all API routes: the database handle and the
/// directory uploaded report files are stored in.
///
/// SQLite connections are not `Sync`, so the single connection lives
/// behind a mutex. Handlers hold the guard only for the duration of
/// their queries.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub uploads_dir: PathBuf,
}

impl ApiContext {
    pub fn new(conn: Connection, uploads_dir: PathBuf) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            uploads_dir,
        }
    }

    /// Acquire the database connection.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::internal("Internal server error", "db lock poisoned"))
    }
}
