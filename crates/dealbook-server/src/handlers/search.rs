//! Search handler.

use axum::extract::{Query, State};
use axum::Json;

use dealbook_core::Company;
use dealbook_storage::SearchFilter;

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::schema::search::SearchParams;
use crate::state::AppState;

/// Searches company records by term, category, and score bounds.
///
/// `GET /api/search?q=...&category=...&minScore=...&maxScore=...`
pub async fn search_companies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<Company>>>, ApiError> {
    let term = match params.q {
        Some(term) if !term.is_empty() => term,
        _ => {
            return Err(ApiError::BadRequest(
                "query parameter q is required".to_string(),
            ))
        }
    };

    let filter = SearchFilter {
        term: Some(term),
        category: params.category,
        min_score: params.min_score,
        max_score: params.max_score,
    };

    let mut store = state.store.lock().await;
    let companies = store.search(&filter)?;
    let count = companies.len();
    Ok(Json(ApiResponse::with_count(companies, count)))
}
