//! Shared fixtures for service tests: SQLite storage in a temp dir and a
//! wiremock stand-in for the remote planet source.

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::time::Duration;

use planet_catalog_core::RequestContext;
use planet_catalog_storage::StorageBackend;
use serde_json::{Value, json};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::SyncService;

mod sync_tests;
mod tag_service_tests;

pub async fn create_test_storage() -> (Arc<StorageBackend>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageBackend::new_sqlite(&temp_dir.path().join("test.db")).await.unwrap();
    (Arc::new(storage), temp_dir)
}

pub fn ctx() -> RequestContext {
    RequestContext::new("tester")
}

/// Serve `planets` at `/planets` in the remote response shape.
pub async fn remote_serving(planets: Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"allPlanets": {"planets": planets}}})),
        )
        .mount(&server)
        .await;
    server
}

pub fn sync_service(storage: &Arc<StorageBackend>, server: &MockServer) -> SyncService {
    let url = format!("{}/planets", server.uri());
    SyncService::from_config(Arc::clone(storage), Some(&url), Duration::from_secs(2)).unwrap()
}

/// Make inserts of `name` hit the unique constraint by writing a clashing row
/// from a trigger just before ours.
pub async fn force_name_clash(temp_dir: &TempDir, name: &str) {
    let options = SqliteConnectOptions::new().filename(temp_dir.path().join("test.db"));
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    sqlx::query(&format!(
        "CREATE TRIGGER clash_on_insert BEFORE INSERT ON planets WHEN NEW.name = '{name}' \
         BEGIN \
             INSERT INTO planets (name, created_at, updated_at) \
             VALUES (NEW.name, NEW.created_at, NEW.updated_at); \
         END"
    ))
    .execute(&mut conn)
    .await
    .unwrap();
}
