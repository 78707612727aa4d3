//! Comparison selection handlers.

use axum::extract::State;
use axum::Json;

use dealbook_core::CompanyId;

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::schema::compare::CompareSaveRequest;
use crate::state::AppState;

/// Returns the saved comparison selection (empty when none exists).
///
/// `GET /api/compare`
pub async fn get_compare_list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompanyId>>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(ApiResponse::ok(store.compare_list())))
}

/// Replaces the saved comparison selection.
///
/// `POST /api/compare`
pub async fn save_compare_list(
    State(state): State<AppState>,
    Json(req): Json<CompareSaveRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ids = req
        .company_ids
        .ok_or_else(|| ApiError::BadRequest("company ids are required".to_string()))?;

    let store = state.store.lock().await;
    store.save_compare_list(&ids)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "compare list saved"
    })))
}
