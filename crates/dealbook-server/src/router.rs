//! Router assembly for the dealbook HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
/// CORS is permissive (the dashboard may be served from any origin).
/// TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Record CRUD
        .route(
            "/api/companies",
            get(handlers::companies::list_companies)
                .post(handlers::companies::create_company),
        )
        .route(
            "/api/companies/{id}",
            get(handlers::companies::get_company)
                .put(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        // Query surface
        .route("/api/search", get(handlers::search::search_companies))
        .route(
            "/api/statistics",
            get(handlers::statistics::get_statistics),
        )
        // Bulk operations
        .route("/api/batch", post(handlers::batch::batch_operations))
        .route("/api/export", get(handlers::transfer::export_companies))
        .route("/api/import", post(handlers::transfer::import_companies))
        // Comparison selection
        .route(
            "/api/compare",
            get(handlers::compare::get_compare_list)
                .post(handlers::compare::save_compare_list),
        )
        // Health
        .route("/api/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
