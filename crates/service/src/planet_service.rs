use std::sync::Arc;

use planet_catalog_core::{Planet, PlanetPayload, RequestContext};
use planet_catalog_storage::{PlanetStore, StorageBackend, UpsertOutcome};

use crate::{Page, PageRequest, ServiceError};

pub struct PlanetService {
    storage: Arc<StorageBackend>,
}

impl PlanetService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Validate, then find-or-create by name.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        payload: PlanetPayload,
    ) -> Result<UpsertOutcome, ServiceError> {
        let input = payload.into_upsert()?;
        let outcome = self.storage.upsert_planet(ctx, &input).await?;
        tracing::debug!(id = outcome.planet.id, created = outcome.created, "planet upserted");
        Ok(outcome)
    }

    /// Validate, then update by id. `replace` requires `name` (full update).
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        payload: PlanetPayload,
        replace: bool,
    ) -> Result<Planet, ServiceError> {
        let patch = payload.into_patch(replace)?;
        Ok(self.storage.update_planet(ctx, id, &patch).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Planet, ServiceError> {
        self.storage.get_planet(id).await?.ok_or_else(|| ServiceError::not_found("planet", id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if self.storage.delete_planet(id).await? {
            tracing::debug!(id, "planet deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("planet", id))
        }
    }

    pub async fn list(&self, request: &PageRequest) -> Result<Page<Planet>, ServiceError> {
        let (page, page_size, query) = request.resolve()?;
        let result = self.storage.list_planets(&query).await?;
        Ok(Page::from_result(result, page, page_size))
    }
}
