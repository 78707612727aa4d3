//! File-backed storage for dealbook company records.
//!
//! Provides the [`CompanyStore`]: one JSON document holding the whole record
//! set, guarded by a sentinel-file write lock, with timestamped backups and
//! automatic restore when the document goes bad.
//!
//! # Architecture
//!
//! The store is an explicit object constructed once per process with an
//! injected data directory and [`Clock`]; nothing here is global. Every
//! public operation re-reads the document first (last-loader-wins against
//! concurrent external writers), applies its mutation in memory, and
//! persists by writing a temporary file and renaming it over the document
//! (atomic replace). Multi-item operations (batch, import) acquire the lock
//! once for the whole sequence.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`clock`]: injected ISO-8601 time source
//! - [`lock`]: sentinel-file mutual exclusion with a typed guard
//! - [`document`]: the persisted envelope and its load path
//! - [`integrity`]: record-set checksums and structural validation
//! - [`backup`]: best-effort create/prune/restore of document copies
//! - [`store`]: the CompanyStore operations

pub mod backup;
pub mod clock;
pub mod document;
pub mod error;
pub mod integrity;
pub mod lock;
pub mod store;

// Re-export commonly used types
pub use backup::{BackupManager, BACKUP_KEEP};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{Document, ExportDocument, DATA_VERSION};
pub use error::StorageError;
pub use lock::{LockFile, LockGuard};
pub use store::{
    BatchOperation, BatchOutcome, CompanyStore, ImportOptions, SearchFilter, Statistics,
};
