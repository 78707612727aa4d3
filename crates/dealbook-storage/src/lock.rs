//! Sentinel-file locking for cross-process write exclusion.
//!
//! Writers serialize on a `.lock` file inside the data directory. The
//! sentinel is created with `create_new`, so creation doubles as the
//! atomic acquisition test. Acquisition retries on a fixed schedule and
//! fails with [`StorageError::LockTimeout`] once the attempt budget is
//! exhausted. The returned [`LockGuard`] removes the sentinel when
//! released or dropped.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::error::StorageError;

/// Default number of acquisition attempts before giving up.
pub const LOCK_ATTEMPTS: u32 = 50;

/// Default delay between acquisition attempts.
pub const LOCK_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Factory for sentinel-file locks on a fixed path.
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
    attempts: u32,
    retry_delay: Duration,
}

impl LockFile {
    /// Lock on `path` with the default retry policy.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_policy(path, LOCK_ATTEMPTS, LOCK_RETRY_DELAY)
    }

    /// Lock on `path` with an explicit attempt budget and retry delay.
    pub fn with_policy(path: impl Into<PathBuf>, attempts: u32, retry_delay: Duration) -> Self {
        Self {
            path: path.into(),
            attempts: attempts.max(1),
            retry_delay,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the lock, retrying until the attempt budget runs out.
    pub fn acquire(&self) -> Result<LockGuard, StorageError> {
        for attempt in 1..=self.attempts {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path)
            {
                Ok(mut sentinel) => {
                    // Construct the guard before writing the pid so a failed
                    // write still removes the sentinel on drop.
                    let guard = LockGuard {
                        path: self.path.clone(),
                        released: false,
                    };
                    sentinel.write_all(std::process::id().to_string().as_bytes())?;
                    tracing::debug!(path = %self.path.display(), attempt, "lock acquired");
                    return Ok(guard);
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    if attempt < self.attempts {
                        thread::sleep(self.retry_delay);
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(StorageError::LockTimeout {
            path: self.path.clone(),
            attempts: self.attempts,
        })
    }
}

/// Proof of lock ownership. Removes the sentinel on release or drop.
#[derive(Debug)]
pub struct LockGuard {
    path: PathBuf,
    released: bool,
}

impl LockGuard {
    /// Release the lock explicitly.
    pub fn release(mut self) {
        self.remove_sentinel();
    }

    fn remove_sentinel(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "lock released"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove lock sentinel");
            }
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.remove_sentinel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn fast_lock(dir: &TempDir) -> LockFile {
        LockFile::with_policy(dir.path().join(".lock"), 3, Duration::from_millis(5))
    }

    #[test]
    fn acquire_writes_pid_sentinel() {
        let dir = TempDir::new().unwrap();
        let lock = fast_lock(&dir);

        let guard = lock.acquire().unwrap();

        let contents = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(
            contents,
            std::process::id().to_string(),
            "sentinel should record the holder's pid"
        );
        drop(guard);
    }

    #[test]
    fn held_lock_times_out_within_budget() {
        let dir = TempDir::new().unwrap();
        let lock = fast_lock(&dir);

        let _guard = lock.acquire().unwrap();
        let second = lock.acquire();

        assert!(
            matches!(second, Err(StorageError::LockTimeout { attempts: 3, .. })),
            "second acquisition should exhaust the attempt budget"
        );
    }

    #[test]
    fn release_allows_reacquisition() {
        let dir = TempDir::new().unwrap();
        let lock = fast_lock(&dir);

        let guard = lock.acquire().unwrap();
        guard.release();

        assert!(!lock.path().exists(), "release should remove the sentinel");
        let reacquired = lock.acquire();
        assert!(reacquired.is_ok());
    }

    #[test]
    fn drop_releases_the_lock() {
        let dir = TempDir::new().unwrap();
        let lock = fast_lock(&dir);

        {
            let _guard = lock.acquire().unwrap();
            assert!(lock.path().exists());
        }

        assert!(!lock.path().exists(), "drop should remove the sentinel");
    }

    #[test]
    fn stale_sentinel_blocks_until_cleared() {
        let dir = TempDir::new().unwrap();
        let lock = fast_lock(&dir);

        fs::write(lock.path(), "12345").unwrap();
        assert!(matches!(
            lock.acquire(),
            Err(StorageError::LockTimeout { .. })
        ));

        fs::remove_file(lock.path()).unwrap();
        assert!(lock.acquire().is_ok());
    }

    #[test]
    fn contended_acquire_succeeds_once_holder_releases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        let holder = LockFile::new(&path);
        let guard = holder.acquire().unwrap();

        let waiter = LockFile::with_policy(path.clone(), 20, Duration::from_millis(10));
        let handle = thread::spawn(move || waiter.acquire().map(|guard| guard.release()));

        thread::sleep(Duration::from_millis(30));
        guard.release();

        handle
            .join()
            .expect("waiter thread panicked")
            .expect("waiter should acquire after release");
    }
}
