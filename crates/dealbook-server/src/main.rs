//! Binary entrypoint for the dealbook HTTP server.
//!
//! Reads configuration from environment variables:
//! - `DEALBOOK_DATA_DIR`: data directory path (default: "data")
//! - `DEALBOOK_PORT`: server listen port (default: "3000")

use std::time::Duration;

use dealbook_server::router::build_router;
use dealbook_server::state::{start_backup_schedule, AppState};

const BACKUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let data_dir = std::env::var("DEALBOOK_DATA_DIR")
        .unwrap_or_else(|_| "data".to_string());
    let port = std::env::var("DEALBOOK_PORT")
        .unwrap_or_else(|_| "3000".to_string());

    let state = AppState::new(&data_dir)
        .expect("Failed to initialize application state");

    start_backup_schedule(state.backup.clone(), BACKUP_INTERVAL);

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("dealbook server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
