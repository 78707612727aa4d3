//! Import request/response types.
//!
//! Export needs no schema of its own; its response body is the storage
//! layer's `ExportDocument` verbatim.

use serde::{Deserialize, Serialize};

use dealbook_storage::{ExportDocument, ImportOptions};

/// Request body for `POST /api/import`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRequest {
    /// The records to import, in export-document shape. A full persisted
    /// document is accepted too; its extra metadata is ignored.
    pub data: Option<ExportDocument>,
    /// Merge/replace behavior; merge by default.
    #[serde(default)]
    pub options: ImportOptions,
}

/// Payload reported after an import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// Number of incoming records submitted (appended or skipped alike).
    pub count: usize,
}
