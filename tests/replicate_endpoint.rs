//! End-to-end tests for the replication endpoint
//!
//! Drives the axum router with in-memory stores substituted for the real
//! backends and asserts the full status/body contract.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use ferry::server::{router, AppState};
use ferry::store::{
    DestinationStore, MemoryStore, ObjectStream, SourceStore, StoreResult,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Store wrapper that counts every backend call it receives
struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceStore for CountingStore {
    async fn open(&self, bucket: &str, key: &str) -> StoreResult<ObjectStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SourceStore::open(&self.inner, bucket, key).await
    }

    fn store_name(&self) -> &str {
        "counting"
    }
}

#[async_trait]
impl DestinationStore for CountingStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    async fn write(&self, key: &str, stream: ObjectStream) -> StoreResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.write(key, stream).await
    }

    fn store_name(&self) -> &str {
        "counting"
    }
}

fn app(source: Arc<MemoryStore>, destination: Arc<MemoryStore>) -> Router {
    router(AppState::new(source, destination))
}

async fn post_replicate(app: &Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/replicate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_replicate_copies_object() {
    let source = Arc::new(MemoryStore::new());
    source
        .put("raw-data/report.csv", Bytes::from_static(b"a,b,c\n1,2,3\n"))
        .await
        .unwrap();
    let destination = Arc::new(MemoryStore::new());
    let app = app(source, destination.clone());

    let (status, body) = post_replicate(
        &app,
        json!({ "s3_bucket": "raw-data", "s3_key": "report.csv" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));
    assert_eq!(
        destination.get("report.csv").await.unwrap(),
        Bytes::from_static(b"a,b,c\n1,2,3\n")
    );
}

#[tokio::test]
async fn test_replicate_is_idempotent() {
    let source = Arc::new(MemoryStore::new());
    source
        .put("raw-data/report.csv", Bytes::from_static(b"payload"))
        .await
        .unwrap();
    let destination = Arc::new(MemoryStore::new());
    let app = app(source, destination.clone());
    let body = json!({ "s3_bucket": "raw-data", "s3_key": "report.csv" }).to_string();

    let (status, response) = post_replicate(&app, body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "status": "success" }));

    let (status, response) = post_replicate(&app, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "status": "already exists" }));
    assert_eq!(
        destination.get("report.csv").await.unwrap(),
        Bytes::from_static(b"payload")
    );
}

#[tokio::test]
async fn test_missing_fields_yield_400_without_backend_calls() {
    let source = Arc::new(CountingStore::new());
    let destination = Arc::new(CountingStore::new());
    let app = router(AppState::new(source.clone(), destination.clone()));

    let payloads = [
        json!({}),
        json!({ "s3_bucket": "raw-data" }),
        json!({ "s3_key": "report.csv" }),
        json!({ "s3_bucket": "", "s3_key": "report.csv" }),
        json!({ "s3_bucket": "raw-data", "s3_key": "" }),
        json!({ "s3_bucket": null, "s3_key": "report.csv" }),
        json!({ "s3_bucket": "raw-data", "s3_key": null }),
    ];

    for payload in payloads {
        let (status, body) = post_replicate(&app, payload.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(
            body,
            json!({ "error": "Missing s3_bucket or s3_key in JSON payload" })
        );
    }

    assert_eq!(source.calls(), 0);
    assert_eq!(destination.calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_yields_400() {
    let source = Arc::new(MemoryStore::new());
    let destination = Arc::new(MemoryStore::new());
    let app = app(source, destination);

    let (status, body) = post_replicate(&app, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_missing_source_object_yields_500() {
    let source = Arc::new(MemoryStore::new());
    let destination = Arc::new(MemoryStore::new());
    let app = app(source, destination.clone());

    let (status, body) = post_replicate(
        &app,
        json!({ "s3_bucket": "raw-data", "s3_key": "missing.csv" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("not found"), "message: {message}");
    assert!(!destination.exists("missing.csv").await.unwrap());
}

#[tokio::test]
async fn test_health() {
    let source = Arc::new(MemoryStore::new());
    let destination = Arc::new(MemoryStore::new());
    let app = app(source, destination);

    let request = Request::builder()
        .method("GET")
        .uri("/v1/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "ferry");
}
