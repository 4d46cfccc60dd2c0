use std::sync::Arc;
use std::time::Duration;

use planet_catalog_core::TagKind;
use planet_catalog_storage::{ListQuery, PlanetStore, TagStore};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{create_test_storage, ctx, force_name_clash, remote_serving, sync_service};
use crate::{ServiceError, SyncFailure, SyncService};

async fn all_planet_names(storage: &planet_catalog_storage::StorageBackend) -> Vec<String> {
    storage
        .list_planets(&ListQuery::new(0, 100))
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[tokio::test]
async fn tatooine_is_imported() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([{
        "name": "Tatooine",
        "population": "200000",
        "climates": ["arid"],
        "terrains": ["desert"],
    }]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 1);
    assert!(report.failures.is_empty());
    let planets = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(planets.total, 1);
    let tatooine = &planets.items[0];
    assert_eq!(tatooine.name, "Tatooine");
    assert_eq!(tatooine.population, Some(200_000));
    assert_eq!(tatooine.climates, vec!["arid".to_owned()]);
    assert_eq!(tatooine.terrains, vec!["desert".to_owned()]);
    assert_eq!(tatooine.audit.created_by.as_deref(), Some("tester"));
}

#[tokio::test]
async fn unknown_population_is_stored_as_null() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([{"name": "Hoth", "population": "unknown"}])).await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 1);
    let hoth = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap().items;
    assert_eq!(hoth[0].population, None);
}

#[tokio::test]
async fn unknown_population_keeps_existing_value() {
    let (storage, _dir) = create_test_storage().await;
    let first = remote_serving(json!([{"name": "Hoth", "population": 1000}])).await;
    sync_service(&storage, &first).sync_from_remote(&ctx()).await.unwrap();

    let second = remote_serving(json!([{"name": "Hoth", "population": "unknown"}])).await;
    sync_service(&storage, &second).sync_from_remote(&ctx()).await.unwrap();

    let hoth = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap().items;
    assert_eq!(hoth.len(), 1);
    assert_eq!(hoth[0].population, Some(1000));
}

#[tokio::test]
async fn failing_middle_item_is_reported_and_skipped() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([
        {"name": "Alderaan", "population": "2000000000", "climates": ["temperate"]},
        {"name": "Kessel", "population": "-5"},
        {"name": "Yavin IV", "population": 1000, "climates": ["temperate", "tropical"]},
    ]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Kessel");
    assert!(report.failures[0].reason.contains("population"), "{}", report.failures[0].reason);
    assert_eq!(all_planet_names(&storage).await, vec!["Alderaan", "Yavin IV"]);
}

#[tokio::test]
async fn overlong_tag_name_fails_only_its_item() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([
        {"name": "Alderaan", "climates": ["temperate"]},
        {"name": "Kamino", "climates": ["x".repeat(150)]},
    ]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.failures[0].name, "Kamino");
    assert!(report.failures[0].reason.contains("climates"), "{}", report.failures[0].reason);
    assert_eq!(all_planet_names(&storage).await, vec!["Alderaan"]);
}

#[tokio::test]
async fn nameless_and_non_object_items_use_position() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([
        {"name": "   ", "population": 5},
        "Dagobah",
        {"name": "Endor"},
    ]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 1);
    let names: Vec<_> = report.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["#1", "#2"]);
}

#[tokio::test]
async fn repeated_sync_is_idempotent() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([
        {"name": "Naboo", "climates": ["temperate"], "terrains": ["grassy hills", "swamps"]},
    ]))
    .await;
    let service = sync_service(&storage, &server);

    service.sync_from_remote(&ctx()).await.unwrap();
    let report = service.sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(all_planet_names(&storage).await, vec!["Naboo"]);
    let terrains = storage.list_tags(TagKind::Terrain, &ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(terrains.total, 2);
}

#[tokio::test]
async fn missing_tag_lists_clear_existing_tags() {
    let (storage, _dir) = create_test_storage().await;
    let first = remote_serving(json!([{"name": "Bespin", "climates": ["temperate"]}])).await;
    sync_service(&storage, &first).sync_from_remote(&ctx()).await.unwrap();

    let second = remote_serving(json!([{"name": "Bespin"}])).await;
    sync_service(&storage, &second).sync_from_remote(&ctx()).await.unwrap();

    let bespin = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap().items;
    assert!(bespin[0].climates.is_empty());
}

#[tokio::test]
async fn duplicate_names_in_one_batch_merge() {
    let (storage, _dir) = create_test_storage().await;
    let server = remote_serving(json!([
        {"name": "Kamino", "population": 1},
        {"name": " Kamino ", "population": 2},
    ]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 2);
    let kamino = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap().items;
    assert_eq!(kamino.len(), 1);
    assert_eq!(kamino[0].population, Some(2));
}

#[tokio::test]
async fn missing_planet_list_imports_nothing() {
    let (storage, _dir) = create_test_storage().await;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 0);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn unconfigured_remote_fails_without_writing() {
    let (storage, _dir) = create_test_storage().await;
    let service = SyncService::from_config(Arc::clone(&storage), Some("  "), Duration::from_secs(1))
        .unwrap();

    assert!(!service.is_configured());
    let err = service.sync_from_remote(&ctx()).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotConfigured(_)), "got {err:?}");
    assert!(all_planet_names(&storage).await.is_empty());
}

#[tokio::test]
async fn upstream_error_aborts_before_writing() {
    let (storage, _dir) = create_test_storage().await;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap_err();

    assert!(matches!(err, ServiceError::Upstream(_)), "got {err:?}");
    assert!(all_planet_names(&storage).await.is_empty());
}

#[test]
fn report_serializes_as_envelope() {
    let report = crate::SyncReport {
        imported: 2,
        failures: vec![SyncFailure { name: "Kessel".to_owned(), reason: "bad".to_owned() }],
    };
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({"imported": 2, "failures": [{"name": "Kessel", "reason": "bad"}]})
    );
}

#[tokio::test]
async fn name_conflict_is_reported_as_item_failure() {
    let (storage, dir) = create_test_storage().await;
    force_name_clash(&dir, "Clash").await;
    let server = remote_serving(json!([
        {"name": "Alderaan", "population": 2000000000},
        {"name": "Clash", "population": 10},
        {"name": "Yavin IV"},
    ]))
    .await;

    let report = sync_service(&storage, &server).sync_from_remote(&ctx()).await.unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Clash");
    assert!(report.failures[0].reason.starts_with("conflict:"));
    assert_eq!(all_planet_names(&storage).await, vec!["Alderaan", "Yavin IV"]);
}
