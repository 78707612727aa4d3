//! Batch mutation handler.

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::schema::batch::{BatchRequest, BatchResponse};
use crate::state::AppState;

/// Applies a sequence of mutations under one store lock acquisition.
///
/// Individual operation failures are reported per item in `results`;
/// only a lock timeout fails the whole request.
///
/// `POST /api/batch`
pub async fn batch_operations(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let mut store = state.store.lock().await;
    let results = store.batch(req.operations)?;
    Ok(Json(BatchResponse {
        success: true,
        results,
    }))
}
