//! Search query parameter types.

use serde::Deserialize;

/// Query parameters for `GET /api/search`.
///
/// `q` is required (the handler rejects its absence); the remaining
/// filters narrow the result set and are ANDed together.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text term matched against name, business, and level.
    pub q: Option<String>,
    /// Exact business tag filter.
    pub category: Option<String>,
    /// Inclusive lower score bound.
    pub min_score: Option<i64>,
    /// Inclusive upper score bound.
    pub max_score: Option<i64>,
}
