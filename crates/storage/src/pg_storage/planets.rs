//! PlanetStore implementation for PgStorage.

use async_trait::async_trait;
use planet_catalog_core::{Planet, PlanetPatch, PlanetUpsert, RequestContext, TagKind};

use super::{PgStorage, row_to_planet};
use crate::catalog::{self, CatalogOps, PLANET_COLUMNS};
use crate::error::StorageError;
use crate::traits::PlanetStore;
use crate::types::{ListQuery, PaginatedResult, UpsertOutcome, count_to_u64, u64_to_i64};

#[async_trait]
impl PlanetStore for PgStorage {
    async fn upsert_planet(
        &self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError> {
        catalog::retry_on_duplicate(&input.name, || self.upsert_once(ctx, input)).await
    }

    async fn update_planet(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: &PlanetPatch,
    ) -> Result<Planet, StorageError> {
        let mut tx = self.pool.begin().await?;
        let planet = catalog::update_planet(&mut *tx, ctx, id, patch).await?;
        tx.commit().await?;
        Ok(planet)
    }

    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        catalog::load_planet(&mut *conn, id).await
    }

    async fn delete_planet(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_planets(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResult<Planet>, StorageError> {
        let pattern = query.like_pattern();
        let mut conn = self.pool.acquire().await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM planets
             WHERE $1::TEXT IS NULL OR LOWER(name) LIKE $1 ESCAPE '\\'",
        )
        .bind(pattern.as_deref())
        .fetch_one(&mut *conn)
        .await?;

        let rows = sqlx::query(&format!(
            "SELECT {PLANET_COLUMNS} FROM planets
             WHERE $1::TEXT IS NULL OR LOWER(name) LIKE $1 ESCAPE '\\'
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(u64_to_i64(query.limit))
        .bind(u64_to_i64(query.offset))
        .fetch_all(&mut *conn)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut planet = row_to_planet(row)?;
            planet.climates = conn.planet_tag_names(TagKind::Climate, planet.id).await?;
            planet.terrains = conn.planet_tag_names(TagKind::Terrain, planet.id).await?;
            items.push(planet);
        }

        Ok(PaginatedResult {
            items,
            total: count_to_u64(total),
            offset: query.offset,
            limit: query.limit,
        })
    }
}
