//! Comparison selection request types.

use serde::Deserialize;

use dealbook_core::CompanyId;

/// Request body for `POST /api/compare`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSaveRequest {
    /// Ids of the records selected for comparison.
    pub company_ids: Option<Vec<CompanyId>>,
}
