//! Batch mutation request/response types.

use serde::{Deserialize, Serialize};

use dealbook_storage::{BatchOperation, BatchOutcome};

/// Request to apply a sequence of mutations under one lock acquisition.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRequest {
    /// Mutations applied in order.
    pub operations: Vec<BatchOperation>,
}

/// Response carrying the per-operation results of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    /// Always `true`: individual failures are reported per item.
    pub success: bool,
    /// One outcome per submitted operation, in order.
    pub results: Vec<BatchOutcome>,
}
