//! End-to-end integration tests for the dealbook HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! CompanyStore -> file system -> HTTP response.
//!
//! Each test creates a fresh AppState backed by a unique temp data directory.
//! Tests use `tower::ServiceExt::oneshot` to send requests directly to the
//! router without starting a network server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use dealbook_server::router::build_router;
use dealbook_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Creates a fresh router backed by a unique temp data directory.
fn test_app() -> Router {
    let state = AppState::temp().expect("failed to create temp AppState");
    build_router(state)
}

/// Sends a request with an optional JSON body and returns (status, json).
async fn send_json(
    app: &Router,
    method: &str,
    path: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(path);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends a POST request with a JSON body and returns (status, json).
async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", path, Some(body)).await
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "GET", path, None).await
}

/// Sends a PUT request with a JSON body and returns (status, json).
async fn put_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", path, Some(body)).await
}

/// Sends a DELETE request and returns (status, json).
async fn delete_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "DELETE", path, None).await
}

/// Creates a company and returns its data payload.
async fn create_company(
    app: &Router,
    name: &str,
    business: &str,
    score: i64,
) -> serde_json::Value {
    let (status, body) = post_json(
        app,
        "/api/companies",
        json!({ "name": name, "business": business, "investmentScore": score }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create company failed: {:?}", body);
    body["data"].clone()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_enveloped_record_with_derived_level() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/companies",
        json!({ "name": "Acme", "investmentScore": 80 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "company added");
    assert_eq!(body["data"]["investmentLevel"], "值得投资");
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[tokio::test]
async fn create_without_name_is_bad_request() {
    let app = test_app();

    let (status, body) =
        post_json(&app, "/api/companies", json!({ "investmentScore": 50 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_duplicate_name_conflicts() {
    let app = test_app();
    create_company(&app, "Acme", "", 80).await;

    let (status, body) = post_json(
        &app,
        "/api/companies",
        json!({ "name": "Acme", "investmentScore": 40 }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn fetch_by_id_roundtrips() {
    let app = test_app();
    let created = create_company(&app, "Acme", "robotics", 80).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = get_json(&app, &format!("/api/companies/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["business"], "robotics");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/companies/no-such-id").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_reports_count() {
    let app = test_app();
    create_company(&app, "Acme", "", 80).await;
    create_company(&app, "Globex", "", 40).await;

    let (status, body) = get_json(&app, "/api/companies").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_rescores_level() {
    let app = test_app();
    let created = create_company(&app, "Acme", "robotics", 80).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/companies/{}", id),
        json!({ "investmentScore": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "company updated");
    assert_eq!(body["data"]["investmentScore"], 10);
    assert_eq!(body["data"]["investmentLevel"], "不建议投资");
    assert_eq!(body["data"]["name"], "Acme");
    assert_eq!(body["data"]["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = test_app();

    let (status, body) = put_json(
        &app,
        "/api/companies/no-such-id",
        json!({ "investmentScore": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = test_app();
    let created = create_company(&app, "Acme", "", 80).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = delete_json(&app, &format!("/api/companies/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "company deleted");
    assert_eq!(body["data"]["name"], "Acme");

    let (status, _) = get_json(&app, &format!("/api/companies/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_requires_query_term() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, _) = get_json(&app, "/api/search?q=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_matches_case_insensitively_with_filters() {
    let app = test_app();
    create_company(&app, "Alibaba", "ecommerce,cloud", 85).await;
    create_company(&app, "ShopRival", "ecommerce", 40).await;
    create_company(&app, "TechCorp", "saas", 60).await;

    let (status, body) = get_json(&app, "/api/search?q=ECOMMERCE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = get_json(&app, "/api/search?q=ecommerce&minScore=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Alibaba");

    let (status, body) = get_json(&app, "/api/search?q=e&category=cloud").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Alibaba");
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn statistics_seed_canonical_buckets() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/statistics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCompanies"], 0);
    assert_eq!(body["data"]["averageScore"], 0);
    let levels = body["data"]["investmentLevels"].as_object().unwrap();
    assert_eq!(levels.len(), 4);
    for label in ["值得投资", "谨慎投资", "高风险", "不建议投资"] {
        assert_eq!(levels[label], 0, "bucket {label} should be seeded");
    }
    assert!(!body["data"]["lastUpdated"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn statistics_count_business_tags() {
    let app = test_app();
    create_company(&app, "Alibaba", "ecommerce,cloud", 85).await;
    create_company(&app, "ShopRival", "ecommerce", 40).await;

    let (_, body) = get_json(&app, "/api/statistics").await;

    assert_eq!(body["data"]["totalCompanies"], 2);
    assert_eq!(body["data"]["businessDistribution"]["ecommerce"], 2);
    assert_eq!(body["data"]["businessDistribution"]["cloud"], 1);
    assert_eq!(body["data"]["averageScore"], 63, "(85 + 40) / 2 rounds to 63");
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_reports_per_item_outcomes() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/batch",
        json!({
            "operations": [
                { "type": "add", "data": { "name": "Acme", "investmentScore": 80 } },
                { "type": "delete", "id": "no-such-id" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["success"], true);
    assert_eq!(results[0]["data"]["name"], "Acme");
    assert_eq!(results[1]["success"], false);
    assert!(results[1]["error"].as_str().unwrap().contains("not found"));

    let (_, body) = get_json(&app, "/api/companies").await;
    assert_eq!(body["count"], 1, "successful operations persist");
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_sets_attachment_disposition() {
    let app = test_app();
    create_company(&app, "Acme", "", 80).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(
        disposition.starts_with("attachment; filename=\"companies_export_"),
        "unexpected disposition: {disposition}"
    );
    assert!(disposition.ends_with(".json\""));

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["companies"].as_array().unwrap().len(), 1);
    assert_eq!(body["version"], "1.0.0");
    assert!(!body["exportTime"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn import_requires_data() {
    let app = test_app();

    let (status, body) = post_json(&app, "/api/import", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn import_merge_skips_records_already_present() {
    let app = test_app();
    let payload = json!({
        "data": {
            "companies": [
                { "id": "imp-1", "name": "Imported Co", "investmentScore": 64 }
            ]
        }
    });

    let (status, body) = post_json(&app, "/api/import", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert!(body["message"].as_str().unwrap().contains('1'));

    // Same payload again: the record's id already exists, so nothing is
    // appended, but the incoming count is still reported.
    let (status, body) = post_json(&app, "/api/import", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);

    let (_, body) = get_json(&app, "/api/companies").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Imported Co");
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

#[tokio::test]
async fn compare_selection_roundtrips() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/compare",
        json!({ "companyIds": ["1", "2"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "compare list saved");

    let (status, body) = get_json(&app, "/api/compare").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["1", "2"]));
}

#[tokio::test]
async fn compare_save_requires_ids() {
    let app = test_app();

    let (status, body) = post_json(&app, "/api/compare", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn compare_selection_defaults_to_empty() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/compare").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}
