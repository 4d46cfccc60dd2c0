use planet_catalog_core::PlanetUpsert;

use super::{create_test_backend, ctx, tatooine};
use crate::traits::PlanetStore;
use crate::types::ListQuery;

#[tokio::test]
async fn batch_commits_every_item() {
    let (backend, _temp_dir) = create_test_backend().await;

    let mut batch = backend.begin_import().await.unwrap();
    assert!(batch.upsert_planet(&ctx(), &tatooine()).await.unwrap().created);
    assert!(batch.upsert_planet(&ctx(), &PlanetUpsert::named("Hoth")).await.unwrap().created);
    batch.commit().await.unwrap();

    let page = backend.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn failed_item_is_rolled_back_alone() {
    let (backend, _temp_dir) = create_test_backend().await;

    let mut batch = backend.begin_import().await.unwrap();
    batch.upsert_planet(&ctx(), &PlanetUpsert::named("Alderaan")).await.unwrap();
    // rejected by the population CHECK constraint
    let bad = PlanetUpsert::named("Broken").with_population(Some(-1));
    assert!(batch.upsert_planet(&ctx(), &bad).await.is_err());
    batch.upsert_planet(&ctx(), &PlanetUpsert::named("Yavin IV")).await.unwrap();
    batch.commit().await.unwrap();

    let page = backend.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    let planet_names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(planet_names, vec!["Alderaan", "Yavin IV"]);
}

#[tokio::test]
async fn batch_updates_existing_planets() {
    let (backend, _temp_dir) = create_test_backend().await;
    let before = backend.upsert_planet(&ctx(), &PlanetUpsert::named("Tatooine")).await.unwrap();

    let mut batch = backend.begin_import().await.unwrap();
    let outcome = batch.upsert_planet(&ctx(), &tatooine()).await.unwrap();
    batch.commit().await.unwrap();

    assert!(!outcome.created);
    assert_eq!(outcome.planet.id, before.planet.id);
    assert_eq!(outcome.planet.population, Some(200_000));
}

#[tokio::test]
async fn uncommitted_batch_is_invisible_and_rolls_back() {
    let (backend, _temp_dir) = create_test_backend().await;

    let mut batch = backend.begin_import().await.unwrap();
    let id = batch.upsert_planet(&ctx(), &tatooine()).await.unwrap().planet.id;
    assert!(backend.get_planet(id).await.unwrap().is_none());

    batch.rollback().await.unwrap();

    let page = backend.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(page.total, 0);
}
