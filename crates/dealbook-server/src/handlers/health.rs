//! Health check handler.

use axum::Json;

use dealbook_storage::{Clock, SystemClock};

/// Liveness probe reporting server time and version.
///
/// `GET /api/health`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "status": "healthy",
        "timestamp": SystemClock.now_iso(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
