//! HTTP API tests
//!
//! Drives the router end to end against a temporary data file.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use stock_advisor_backend::config::{Config, StorageConfig};
use stock_advisor_backend::{create_app, local_today, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

async fn setup_app(content: Option<&str>) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("stock_data_hist.json");
    if let Some(content) = content {
        std::fs::write(&data_file, content).unwrap();
    }

    let config = Config {
        storage: StorageConfig { data_file },
        ..Config::default()
    };
    let state = AppState::load(config).await;
    (create_app(state), dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn today_string() -> String {
    local_today().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn test_health_reports_clean_start() {
    let (app, _dir) = setup_app(None).await;

    let (status, _, body) = send(&app, get("/api/v1/health")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"], "ok");
    assert_eq!(json["products"], 0);
}

#[tokio::test]
async fn test_health_reports_corrupt_file() {
    let (app, _dir) = setup_app(Some("{broken")).await;

    let (_, _, body) = send(&app, get("/api/v1/health")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["storage"], "recovered_empty");
    assert!(json["load_warning"].is_string());
}

#[tokio::test]
async fn test_create_then_select_product() {
    let (app, _dir) = setup_app(None).await;

    let (status, _, body) = send(&app, post_json("/api/v1/products", json!({"name": "Coffee"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"name": "Coffee", "created": true}));

    let (status, _, body) = send(&app, post_json("/api/v1/products", json!({"name": "Coffee "}))).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["created"], false);

    let (_, _, body) = send(&app, get("/api/v1/products")).await;
    let names: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(names, vec!["Coffee"]);
}

#[tokio::test]
async fn test_blank_product_name_is_bad_request() {
    let (app, _dir) = setup_app(None).await;

    let (status, _, body) = send(&app, post_json("/api/v1/products", json!({"name": " "}))).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "name");
}

#[tokio::test]
async fn test_record_sale_and_summary() {
    let (app, _dir) = setup_app(None).await;
    send(&app, post_json("/api/v1/products", json!({"name": "Coffee"}))).await;

    let (status, _, body) = send(
        &app,
        post_json(
            "/api/v1/products/Coffee/sales",
            json!({"date": today_string(), "quantity": 10}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["outcome"]["status"], "added");

    let (status, _, body) = send(&app, get("/api/v1/products/Coffee")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["recommendation"]["optimal_stock"], 60);
    assert_eq!(json["recommendation"]["reorder_point"], 60);
    assert_eq!(json["recent_history"][0]["fecha"], today_string());
    assert_eq!(json["recent_history"][0]["cantidad"], 10);
}

#[tokio::test]
async fn test_resubmitted_sale_updates() {
    let (app, _dir) = setup_app(None).await;
    send(&app, post_json("/api/v1/products", json!({"name": "Coffee"}))).await;
    send(&app, post_json("/api/v1/products/Coffee/sales", json!({"quantity": 2}))).await;

    let (_, _, body) = send(&app, post_json("/api/v1/products/Coffee/sales", json!({"quantity": 5}))).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["outcome"]["status"], "updated");
    assert_eq!(json["summary"]["total_entries"], 1);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (app, _dir) = setup_app(None).await;

    let (status, _, body) = send(&app, get("/api/v1/products/Nothing")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_history_formats() {
    let (app, _dir) = setup_app(None).await;
    send(&app, post_json("/api/v1/products", json!({"name": "Coffee"}))).await;
    send(&app, post_json("/api/v1/products/Coffee/sales", json!({"quantity": 4}))).await;

    let (_, headers, body) = send(&app, get("/api/v1/products/Coffee/history?format=csv")).await;
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        String::from_utf8(body).unwrap(),
        format!("fecha,cantidad\n{},4\n", today_string())
    );

    let (_, _, body) = send(&app, get("/api/v1/products/Coffee/history?format=text")).await;
    assert_eq!(String::from_utf8(body).unwrap(), format!("{}: 4 uds", today_string()));

    let (_, _, body) = send(&app, get("/api/v1/products/Coffee/history")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_export_download() {
    let (app, _dir) = setup_app(None).await;

    let (status, _, _) = send(&app, get("/api/v1/export")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, post_json("/api/v1/products", json!({"name": "Café"}))).await;
    let (status, headers, body) = send(&app, get("/api/v1/export")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"stock_data_hist.json\""
    );
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"Café": {"ventas_historico": []}}));
}

#[tokio::test]
async fn test_existing_file_is_loaded() {
    let today = today_string();
    let content = format!(
        r#"{{"Tea": {{"ventas_historico": [{{"fecha": "{}", "cantidad": 2}}]}}}}"#,
        today
    );
    let (app, _dir) = setup_app(Some(&content)).await;

    let (_, _, body) = send(&app, get("/api/v1/products/Tea")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["recommendation"]["optimal_stock"], 12);
    assert_eq!(json["total_entries"], 1);
}

#[tokio::test]
async fn test_huge_hand_edited_quantities_saturate() {
    let today = local_today();
    let yesterday = today.pred_opt().unwrap();
    let content = format!(
        r#"{{"Tea": {{"ventas_historico": [
            {{"fecha": "{}", "cantidad": 5e28}},
            {{"fecha": "{}", "cantidad": 5e28}}
        ]}}}}"#,
        today.format("%Y-%m-%d"),
        yesterday.format("%Y-%m-%d")
    );
    let (app, _dir) = setup_app(Some(&content)).await;

    let (status, _, body) = send(&app, get("/api/v1/products/Tea")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["recommendation"]["optimal_stock"], u64::MAX);
}
