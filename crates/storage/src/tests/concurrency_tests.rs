use std::collections::HashSet;

use planet_catalog_core::{PlanetUpsert, TagKind};

use super::{create_test_storage, ctx, names};
use crate::traits::{PlanetStore, TagStore};
use crate::types::ListQuery;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_of_distinct_planets_all_succeed() {
    let (storage, _temp_dir) = create_test_storage().await;

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let storage = storage.clone();
            tokio::spawn(async move {
                let input = PlanetUpsert::named(format!("P{i}"))
                    .with_tags(TagKind::Climate, names(&["temperate"]));
                storage.upsert_planet(&ctx(), &input).await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().created);
    }

    let page = storage.list_planets(&ListQuery::new(0, 100)).await.unwrap();
    assert_eq!(page.total, 16);
    let climates = storage.list_tags(TagKind::Climate, &ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(climates.total, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_of_one_name_create_it_once() {
    let (storage, _temp_dir) = create_test_storage().await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let storage = storage.clone();
            tokio::spawn(async move {
                let input = PlanetUpsert::named("Hoth").with_population(Some(1000));
                storage.upsert_planet(&ctx(), &input).await
            })
        })
        .collect();

    let mut created = 0;
    let mut ids = HashSet::new();
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        created += usize::from(outcome.created);
        ids.insert(outcome.planet.id);
    }
    assert_eq!(created, 1);
    assert_eq!(ids.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crud_write_waits_for_running_import() {
    let (storage, _temp_dir) = create_test_storage().await;
    let backend = crate::StorageBackend::Sqlite(storage.clone());

    let mut batch = backend.begin_import().await.unwrap();
    batch.upsert_planet(&ctx(), &PlanetUpsert::named("Alderaan")).await.unwrap();

    let writer = {
        let storage = storage.clone();
        tokio::spawn(async move { storage.upsert_planet(&ctx(), &PlanetUpsert::named("Bespin")).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    batch.commit().await.unwrap();

    assert!(writer.await.unwrap().unwrap().created);
    let page = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(page.total, 2);
}
