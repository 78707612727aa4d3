//! Application state with the shared `CompanyStore` for concurrent access.
//!
//! [`AppState`] wraps the store in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. Uses `tokio::sync::Mutex` (async-aware) instead of
//! `std::sync::Mutex` (blocking) so handlers await the lock without blocking
//! the tokio runtime. The store itself is synchronous, so a handler holding
//! the mutex blocks its own task through file I/O and sentinel-lock polling;
//! only the sentinel polling is bounded (the lock's attempt budget).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use dealbook_storage::{BackupManager, CompanyStore};

use crate::error::ApiError;

/// Shared application state for the HTTP server.
///
/// Wraps `CompanyStore` in `Arc<tokio::sync::Mutex<>>` so it can be shared
/// across async handler tasks. All handlers acquire the mutex via
/// `.lock().await`; cross-process exclusion stays with the store's own
/// sentinel-file lock.
#[derive(Clone)]
pub struct AppState {
    /// The shared store (async Mutex -- non-blocking await).
    pub store: Arc<tokio::sync::Mutex<CompanyStore>>,
    /// Backup manager handle for the periodic snapshot task.
    pub backup: Arc<BackupManager>,
}

impl AppState {
    /// Creates a new `AppState` backed by the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let store = CompanyStore::open(data_dir)?;
        let backup = Arc::new(store.backup_manager().clone());
        Ok(AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            backup,
        })
    }

    /// Creates a new `AppState` backed by a unique temp directory (for testing).
    pub fn temp() -> Result<Self, ApiError> {
        let dir = std::env::temp_dir().join(format!("dealbook_test_{}", uuid::Uuid::new_v4()));
        Self::new(dir)
    }
}

/// Spawns the periodic backup task for the process lifetime.
///
/// The first tick fires immediately, so startup takes an initial snapshot.
/// Backup failures are logged inside the manager and never stop the task.
pub fn start_backup_schedule(backup: Arc<BackupManager>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            backup.create_backup();
        }
    });
}
