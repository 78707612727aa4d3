//! Storage error types for dealbook-storage.
//!
//! [`StorageError`] covers all anticipated failure modes in the storage
//! layer: I/O and serialization faults, the domain rules enforced at the
//! mutation boundary, lock-acquisition timeouts, and corrupt documents.

use std::path::PathBuf;

use thiserror::Error;

use dealbook_core::CompanyId;

/// Errors produced by store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An underlying file-system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A required input field was missing or malformed.
    #[error("validation error: {reason}")]
    Validation { reason: String },

    /// Another record already uses the requested name.
    #[error("company name already exists: {name}")]
    DuplicateName { name: String },

    /// No record matches the given id.
    #[error("company not found: {id}")]
    NotFound { id: CompanyId },

    /// The sentinel lock could not be acquired within the attempt budget.
    #[error("could not acquire lock {path} after {attempts} attempts", path = path.display())]
    LockTimeout { path: PathBuf, attempts: u32 },

    /// The on-disk document failed to parse or validate.
    #[error("corrupt data: {reason}")]
    CorruptData { reason: String },
}
