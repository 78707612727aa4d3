//! Statistics handler.

use axum::extract::State;
use axum::Json;

use dealbook_storage::Statistics;

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::state::AppState;

/// Returns aggregate statistics over the record set.
///
/// `GET /api/statistics`
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Statistics>>, ApiError> {
    let mut store = state.store.lock().await;
    let stats = store.statistics()?;
    Ok(Json(ApiResponse::ok(stats)))
}
