//! Router tests: the full axum stack over SQLite in a temp dir, driven with
//! `tower::ServiceExt::oneshot`.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use planet_catalog_core::CatalogConfig;
use planet_catalog_storage::StorageBackend;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{AppState, create_router};


pub fn open_config() -> CatalogConfig {
    CatalogConfig { swapi_timeout: Duration::from_secs(2), ..CatalogConfig::default() }
}

pub async fn test_app(config: &CatalogConfig) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageBackend::new_sqlite(&temp_dir.path().join("test.db")).await.unwrap();
    let state = AppState::new(Arc::new(storage), config).unwrap();
    (create_router(Arc::new(state)), temp_dir)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

/// Status and JSON body (`Value::Null` when the body is empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}
