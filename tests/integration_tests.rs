//! Integration tests against the HTTP router
//!
//! Tests the full request flow: credential check → cursor decode → dataset
//! snapshot → JSON page, plus the feed client walking a live server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use sensor_feed::auth::ApiKeyGuard;
use sensor_feed::cli::{router, AppState};
use sensor_feed::cursor;
use sensor_feed::dataset::{Dataset, DatasetStore, ReloadPolicy};
use sensor_feed::http::{FeedClient, FeedClientConfig};
use sensor_feed::pagination::Paginator;
use sensor_feed::reading::transform_records;
use serde_json::{json, Value};
use tower::ServiceExt;

const API_KEY: &str = "integration-key";

fn readings(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "mesh_id": format!("mesh-{:03}", i % 3),
                "device_id": format!("device-{i}"),
                "temperature_c": 20.0,
                "humidity": 50.0,
                "status": "ok"
            })
        })
        .collect()
}

fn app_with_store(store: DatasetStore) -> Router {
    let guard = ApiKeyGuard::with_default_header(API_KEY).unwrap();
    router(AppState::new(guard, Paginator::default(), store))
}

fn app(count: usize) -> Router {
    app_with_store(DatasetStore::from_dataset(Dataset::new(readings(count))))
}

async fn get(app: Router, uri: &str, key: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn page_uri(cursor: &str) -> String {
    format!("/sensor-data?cursor={cursor}")
}

// ============================================================================
// Pagination Flow Tests
// ============================================================================

#[tokio::test]
async fn test_three_page_walk() {
    let (status, first) = get(app(250), "/sensor-data", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["results"].as_array().unwrap().len(), 100);
    assert_eq!(first["results"][0]["device_id"], "device-0");
    let next = first["next_cursor"].as_str().unwrap().to_string();

    let (_, second) = get(app(250), &page_uri(&next), Some(API_KEY)).await;
    assert_eq!(second["results"].as_array().unwrap().len(), 100);
    assert_eq!(second["results"][0]["device_id"], "device-100");
    let next = second["next_cursor"].as_str().unwrap().to_string();

    let (_, third) = get(app(250), &page_uri(&next), Some(API_KEY)).await;
    assert_eq!(third["results"].as_array().unwrap().len(), 50);
    assert_eq!(third["results"][49]["device_id"], "device-249");
    assert_eq!(third["next_cursor"], Value::Null);
}

#[tokio::test]
async fn test_exact_multiple_has_no_trailing_page() {
    let token = cursor::encode(100);
    let (status, body) = get(app(200), &page_uri(&token), Some(API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 100);
    assert_eq!(body["next_cursor"], Value::Null);
}

#[tokio::test]
async fn test_past_end_cursor_returns_empty_page() {
    let token = cursor::encode(5000);
    let (status, body) = get(app(250), &page_uri(&token), Some(API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": [], "next_cursor": null}));
}

#[tokio::test]
async fn test_response_shape() {
    let (_, body) = get(app(1), "/sensor-data", Some(API_KEY)).await;
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["next_cursor", "results"]);
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_cursor_is_bad_request() {
    for bad in ["!", "12_3", "abc%2D", "ZZZZZZZZZZZZZZZZ"] {
        let (status, body) = get(app(250), &page_uri(bad), Some(API_KEY)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "cursor {bad:?}");
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid cursor"));
    }
}

#[tokio::test]
async fn test_empty_cursor_is_bad_request() {
    let (status, _) = get(app(250), "/sensor-data?cursor=", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_key_is_forbidden() {
    let (status, body) = get(app(250), "/sensor-data", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"success": false, "error": "Forbidden"}));
}

#[tokio::test]
async fn test_wrong_key_is_forbidden() {
    let (status, _) = get(app(250), "/sensor-data", Some("nope")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_auth_checked_before_cursor() {
    let (status, _) = get(app(250), &page_uri("!"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_cursor_without_key_is_forbidden() {
    let (status, body) = get(app(250), "/sensor-data?cursor=1&cursor=2", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"success": false, "error": "Forbidden"}));
}

#[tokio::test]
async fn test_duplicate_cursor_with_key_is_bad_request() {
    let (status, body) = get(app(250), "/sensor-data?cursor=1&cursor=2", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query"));
}

#[tokio::test]
async fn test_invalid_cursor_rejected_before_dataset_access() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    // A request that reaches the dataset fails with 500 here.
    let store = DatasetStore::new(&missing, ReloadPolicy::PerRequest);
    let (status, _) = get(app_with_store(store), "/sensor-data", Some(API_KEY)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let store = DatasetStore::new(&missing, ReloadPolicy::PerRequest);
    let (status, _) = get(app_with_store(store), &page_uri("12_3"), Some(API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let (status, body) = get(app(0), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

// ============================================================================
// Dataset Reload Tests
// ============================================================================

#[tokio::test]
async fn test_per_request_reload_serves_new_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sensor_data.json");
    std::fs::write(&path, serde_json::to_string(&readings(5)).unwrap()).unwrap();

    let store = DatasetStore::open(&path, ReloadPolicy::PerRequest)
        .await
        .unwrap();
    let app = app_with_store(store);

    let (_, body) = get(app.clone(), "/sensor-data", Some(API_KEY)).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 5);

    std::fs::write(&path, serde_json::to_string(&readings(150)).unwrap()).unwrap();

    let (_, body) = get(app, "/sensor-data", Some(API_KEY)).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 100);
    assert_eq!(body["next_cursor"], "1C");
}

// ============================================================================
// Live Server Tests
// ============================================================================

#[tokio::test]
async fn test_feed_client_walks_live_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(250);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = FeedClientConfig::builder()
        .url(format!("http://{addr}/sensor-data"))
        .api_key(API_KEY)
        .build();
    let client = FeedClient::new(config).unwrap();

    let result = client.fetch_all(100).await.unwrap();
    assert_eq!(result.pages, 3);
    assert!(result.complete);
    assert_eq!(result.records, readings(250));
}

#[tokio::test]
async fn test_feed_client_forbidden_on_live_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app(10);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = FeedClientConfig::builder()
        .url(format!("http://{addr}/sensor-data"))
        .api_key("wrong")
        .build();
    let client = FeedClient::new(config).unwrap();

    let err = client.fetch_page(None).await.unwrap_err();
    assert!(matches!(
        err,
        sensor_feed::Error::HttpStatus { status: 403, .. }
    ));
}

#[tokio::test]
async fn test_crawled_readings_transform() {
    let records = vec![
        json!({"mesh_id": "mesh-001", "device_id": "device-A", "timestamp": "2025-03-26T15:45:00+02:00",
               "temperature_c": 22.4, "humidity": 41.0, "status": "ok"}),
        json!({"mesh_id": "mesh-002", "device_id": "device-C", "timestamp": "2025-03-26T13:47:00Z",
               "temperature_c": -12.0, "humidity": 95.2, "status": "ok"}),
    ];
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app_with_store(DatasetStore::from_dataset(Dataset::new(records)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = FeedClientConfig::builder()
        .url(format!("http://{addr}/sensor-data"))
        .api_key(API_KEY)
        .build();
    let result = FeedClient::new(config).unwrap().fetch_all(10).await.unwrap();
    let readings = transform_records(&result.records).unwrap();

    assert_eq!(readings.len(), 2);
    assert_eq!(
        readings[0].timestamp_utc.to_rfc3339(),
        "2025-03-26T13:45:00+00:00"
    );
    assert!(!readings[0].temperature_alert && !readings[0].humidity_alert);
    assert!(readings[1].temperature_alert && readings[1].humidity_alert);
}
