use planet_catalog_core::PlanetUpsert;

use super::{create_test_storage, ctx, force_name_clash};
use crate::StorageBackend;
use crate::traits::PlanetStore;
use crate::types::ListQuery;

#[tokio::test]
async fn repeated_conflict_surfaces_as_duplicate() {
    let (storage, _temp_dir) = create_test_storage().await;
    force_name_clash(&storage, "Clash").await;

    let err = storage.upsert_planet(&ctx(), &PlanetUpsert::named("Clash")).await.unwrap_err();
    assert!(err.is_duplicate());

    let page = storage.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn conflicting_import_item_is_skipped_alone() {
    let (storage, _temp_dir) = create_test_storage().await;
    force_name_clash(&storage, "Clash").await;
    let backend = StorageBackend::Sqlite(storage);

    let mut batch = backend.begin_import().await.unwrap();
    batch.upsert_planet(&ctx(), &PlanetUpsert::named("Alderaan")).await.unwrap();
    let err = batch.upsert_planet(&ctx(), &PlanetUpsert::named("Clash")).await.unwrap_err();
    assert!(err.is_duplicate());
    batch.upsert_planet(&ctx(), &PlanetUpsert::named("Yavin IV")).await.unwrap();
    batch.commit().await.unwrap();

    let page = backend.list_planets(&ListQuery::new(0, 10)).await.unwrap();
    let planet_names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(planet_names, vec!["Alderaan", "Yavin IV"]);
}
