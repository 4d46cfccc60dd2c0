use async_trait::async_trait;
use planet_catalog_core::{Planet, PlanetPatch, PlanetUpsert, RequestContext};

use crate::error::StorageError;
use crate::types::{ListQuery, PaginatedResult, UpsertOutcome};

/// Planet persistence, including the tag-normalizing upsert.
#[async_trait]
pub trait PlanetStore: Send + Sync {
    /// Find-or-create by exact name, then apply the provided fields.
    ///
    /// Runs in its own transaction. A unique-name race is retried once and
    /// surfaces as [`StorageError::Duplicate`] if it happens again.
    async fn upsert_planet(
        &self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError>;

    /// Apply `patch` to the planet with `id`.
    ///
    /// Fails with [`StorageError::NotFound`] when the id is unknown and
    /// [`StorageError::Duplicate`] when a rename collides.
    async fn update_planet(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: &PlanetPatch,
    ) -> Result<Planet, StorageError>;

    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, StorageError>;

    /// Delete by id. Returns `true` if a row was deleted. Tags are kept.
    async fn delete_planet(&self, id: i64) -> Result<bool, StorageError>;

    /// Planets ordered by name.
    async fn list_planets(&self, query: &ListQuery)
    -> Result<PaginatedResult<Planet>, StorageError>;
}
