//! Export and import handlers.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::schema::transfer::{ImportRequest, ImportSummary};
use crate::state::AppState;

/// Downloads the full record set as an export document.
///
/// The body is the bare export document (no envelope) with an attachment
/// disposition, so browsers save it as a dated file.
///
/// `GET /api/export`
pub async fn export_companies(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = state.store.lock().await;
    let export = store.export_all()?;

    let date = match export.export_time.split_once('T') {
        Some((date, _)) => date,
        None => export.export_time.as_str(),
    };
    let disposition = format!("attachment; filename=\"companies_export_{date}.json\"");

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export)))
}

/// Imports records from an export document.
///
/// `POST /api/import`
pub async fn import_companies(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ApiResponse<ImportSummary>>, ApiError> {
    let data = req
        .data
        .ok_or_else(|| ApiError::BadRequest("import data is required".to_string()))?;

    let mut store = state.store.lock().await;
    let count = store.import_all(data.companies, &req.options)?;
    Ok(Json(ApiResponse::with_message(
        ImportSummary { count },
        format!("import complete: {count} record(s) received"),
    )))
}
