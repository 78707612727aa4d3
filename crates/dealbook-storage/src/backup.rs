//! Timestamped backups of the data file.
//!
//! Backups are plain copies of `companies.json` named
//! `companies_<stamp>.json`, where the stamp is the clock's ISO time with
//! `:` and `.` replaced by `-` to stay file-system safe. Only the newest
//! [`BACKUP_KEEP`] copies are retained. Backup failures are logged and
//! swallowed so they never block a write.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use crate::clock::Clock;
use crate::document::{self, Document};

/// Number of backup files retained after pruning.
pub const BACKUP_KEEP: usize = 3;

/// Creates, prunes, and restores backups of a single data file.
#[derive(Clone)]
pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
    keep: usize,
    clock: Arc<dyn Clock>,
}

impl BackupManager {
    pub fn new(
        data_file: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
            keep: BACKUP_KEEP,
            clock,
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copy the data file into the backup directory, then prune.
    ///
    /// Returns the backup path, or `None` when the copy failed (missing
    /// data file included). Failures are logged, never propagated.
    pub fn create_backup(&self) -> Option<PathBuf> {
        let stamp = self.clock.now_iso().replace([':', '.'], "-");
        let target = self.backup_dir.join(format!("companies_{stamp}.json"));

        match fs::copy(&self.data_file, &target) {
            Ok(_) => {
                tracing::info!(backup = %target.display(), "backup created");
                self.prune_old_backups();
                Some(target)
            }
            Err(err) => {
                tracing::warn!(error = %err, "backup skipped");
                None
            }
        }
    }

    /// Remove backups beyond the retention count, oldest first.
    fn prune_old_backups(&self) {
        for stale in self.backup_files().iter().skip(self.keep) {
            match fs::remove_file(stale) {
                Ok(()) => tracing::debug!(backup = %stale.display(), "old backup pruned"),
                Err(err) => {
                    tracing::warn!(backup = %stale.display(), error = %err, "failed to prune backup");
                }
            }
        }
    }

    /// Load the newest backup that parses and validates.
    ///
    /// Candidates are tried newest first; unreadable or corrupt backups
    /// are skipped. Returns `None` when no usable backup exists.
    pub fn restore_latest(&self) -> Option<Document> {
        for candidate in self.backup_files() {
            match document::load(&candidate) {
                Ok(document) => {
                    tracing::info!(backup = %candidate.display(), "restored from backup");
                    return Some(document);
                }
                Err(err) => {
                    tracing::warn!(backup = %candidate.display(), error = %err, "skipping unusable backup");
                }
            }
        }
        None
    }

    /// Backup files, newest first by modification time then name.
    fn backup_files(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(dir = %self.backup_dir.display(), error = %err, "cannot list backups");
                return Vec::new();
            }
        };

        let mut files: Vec<_> = entries
            .flatten()
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with("companies_") && name.ends_with(".json")
            })
            .map(|entry| {
                let modified = entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .unwrap_or(UNIX_EPOCH);
                (modified, entry.path())
            })
            .collect();

        files.sort_by(|a, b| b.cmp(a));
        files.into_iter().map(|(_, path)| path).collect()
    }
}
