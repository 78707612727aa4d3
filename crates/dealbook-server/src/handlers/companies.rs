//! Company record handlers (list, create, fetch, update, delete).

use axum::extract::{Path, State};
use axum::Json;

use dealbook_core::{Company, CompanyDraft, CompanyId, CompanyPatch};

use crate::error::ApiError;
use crate::schema::common::ApiResponse;
use crate::state::AppState;

/// Lists all company records.
///
/// `GET /api/companies`
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Company>>>, ApiError> {
    let mut store = state.store.lock().await;
    let companies = store.all_companies()?;
    let count = companies.len();
    Ok(Json(ApiResponse::with_count(companies, count)))
}

/// Creates a company record.
///
/// `POST /api/companies`
pub async fn create_company(
    State(state): State<AppState>,
    Json(draft): Json<CompanyDraft>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let mut store = state.store.lock().await;
    let company = store.add_company(draft)?;
    Ok(Json(ApiResponse::with_message(company, "company added")))
}

/// Fetches one company record by id.
///
/// `GET /api/companies/{id}`
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let mut store = state.store.lock().await;
    let company = store.company_by_id(&CompanyId::from(id))?;
    Ok(Json(ApiResponse::ok(company)))
}

/// Applies a partial update to a company record.
///
/// `PUT /api/companies/{id}`
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CompanyPatch>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let mut store = state.store.lock().await;
    let company = store.update_company(&CompanyId::from(id), patch)?;
    Ok(Json(ApiResponse::with_message(company, "company updated")))
}

/// Deletes a company record, returning the removed record.
///
/// `DELETE /api/companies/{id}`
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let mut store = state.store.lock().await;
    let company = store.delete_company(&CompanyId::from(id))?;
    Ok(Json(ApiResponse::with_message(company, "company deleted")))
}
