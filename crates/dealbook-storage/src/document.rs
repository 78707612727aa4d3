//! On-disk document formats.
//!
//! The store persists a single [`Document`] per data directory. Export and
//! import exchange the lighter [`ExportDocument`], which drops the
//! checksum and `lastModified` metadata.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dealbook_core::Company;

use crate::error::StorageError;
use crate::integrity::{self, companies_checksum};

/// Format version written into every persisted document.
pub const DATA_VERSION: &str = "1.0.0";

/// Root of the persisted data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub companies: Vec<Company>,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub checksum: String,
}

impl Document {
    /// Build a document with a freshly computed checksum.
    pub fn new(companies: Vec<Company>, last_modified: String) -> Self {
        let checksum = companies_checksum(&companies);
        Self {
            companies,
            last_modified,
            version: DATA_VERSION.to_string(),
            checksum,
        }
    }
}

/// Payload exchanged by export and import.
///
/// Import also accepts a full [`Document`] since its extra metadata fields
/// are simply ignored during deserialization into this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub companies: Vec<Company>,
    #[serde(default)]
    pub export_time: String,
    #[serde(default)]
    pub version: String,
}

/// Read and validate the document at `path`.
///
/// A missing file surfaces as [`StorageError::Io`] with
/// [`std::io::ErrorKind::NotFound`]; parse failures and records missing
/// required fields surface as [`StorageError::CorruptData`].
pub fn load(path: &Path) -> Result<Document, StorageError> {
    let raw = fs::read(path)?;
    let document: Document = serde_json::from_slice(&raw).map_err(|err| {
        StorageError::CorruptData {
            reason: err.to_string(),
        }
    })?;

    if !integrity::document_is_valid(&document) {
        return Err(StorageError::CorruptData {
            reason: "a record is missing its id or name".to_string(),
        });
    }

    Ok(document)
}
