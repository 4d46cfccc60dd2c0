use planet_catalog_core::{TagKind, TagPayload};

use super::{create_test_storage, ctx};
use crate::{PageRequest, ServiceError, TagService};

fn named(name: &str) -> TagPayload {
    TagPayload { name: Some(name.to_owned()) }
}

#[tokio::test]
async fn create_trims_and_rejects_duplicates() {
    let (storage, _dir) = create_test_storage().await;
    let service = TagService::new(storage);

    let tag = service.create(&ctx(), TagKind::Climate, named("  arid ")).await.unwrap();
    assert_eq!(tag.name, "arid");

    let err = service.create(&ctx(), TagKind::Climate, named("arid")).await.unwrap_err();
    assert!(err.is_duplicate());
}

#[tokio::test]
async fn blank_name_is_validation_error() {
    let (storage, _dir) = create_test_storage().await;
    let service = TagService::new(storage);

    let err = service.create(&ctx(), TagKind::Terrain, named("   ")).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn crud_round() {
    let (storage, _dir) = create_test_storage().await;
    let service = TagService::new(storage);
    let tag = service.create(&ctx(), TagKind::Terrain, named("tundra")).await.unwrap();

    let renamed = service.rename(&ctx(), TagKind::Terrain, tag.id, named("ice caves")).await.unwrap();
    assert_eq!(renamed.name, "ice caves");
    assert_eq!(service.get(TagKind::Terrain, tag.id).await.unwrap().name, "ice caves");

    service.delete(TagKind::Terrain, tag.id).await.unwrap();
    assert!(service.get(TagKind::Terrain, tag.id).await.unwrap_err().is_not_found());
    assert!(service.delete(TagKind::Terrain, tag.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn list_is_per_kind() {
    let (storage, _dir) = create_test_storage().await;
    let service = TagService::new(storage);
    service.create(&ctx(), TagKind::Climate, named("humid")).await.unwrap();
    service.create(&ctx(), TagKind::Terrain, named("jungle")).await.unwrap();

    let climates = service.list(TagKind::Climate, &PageRequest::default()).await.unwrap();

    assert_eq!(climates.count, 1);
    assert_eq!(climates.items[0].name, "humid");
}
