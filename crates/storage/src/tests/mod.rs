//! Test utilities and module declarations for storage tests.

#![allow(clippy::unwrap_used, reason = "test code")]

use planet_catalog_core::{PlanetUpsert, RequestContext, TagKind};
use tempfile::TempDir;

use crate::{SqliteStorage, StorageBackend};

mod concurrency_tests;
mod conflict_tests;
mod import_tests;

pub async fn create_test_storage() -> (SqliteStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = SqliteStorage::open(&db_path).await.unwrap();
    (storage, temp_dir)
}

pub async fn create_test_backend() -> (StorageBackend, TempDir) {
    let (storage, temp_dir) = create_test_storage().await;
    (StorageBackend::Sqlite(storage), temp_dir)
}

pub fn ctx() -> RequestContext {
    RequestContext::new("tester")
}

pub fn tatooine() -> PlanetUpsert {
    PlanetUpsert::named("Tatooine")
        .with_population(Some(200_000))
        .with_tags(TagKind::Climate, vec!["arid".to_owned()])
        .with_tags(TagKind::Terrain, vec!["desert".to_owned()])
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

/// Make every insert of a planet named `name` hit the unique constraint: a
/// trigger writes a row with the same name just before ours.
pub async fn force_name_clash(storage: &SqliteStorage, name: &str) {
    sqlx::query(&format!(
        "CREATE TRIGGER clash_on_insert BEFORE INSERT ON planets WHEN NEW.name = '{name}' \
         BEGIN \
             INSERT INTO planets (name, created_at, updated_at) \
             VALUES (NEW.name, NEW.created_at, NEW.updated_at); \
         END"
    ))
    .execute(&storage.pool)
    .await
    .unwrap();
}
