//! Backend-neutral catalog algorithms.
//!
//! The tag normalizer and the planet upsert are written once against
//! [`CatalogOps`], a small set of row-level primitives that each backend
//! implements on its raw connection type. Callers decide the transaction
//! boundary: the same functions run inside a per-request transaction or inside
//! a savepoint of an import batch.

use async_trait::async_trait;
use planet_catalog_core::{
    Planet, PlanetPatch, PlanetUpsert, RequestContext, TagKind, TagRef, normalize_tag_names,
};

use crate::error::StorageError;
use crate::types::UpsertOutcome;

/// Row-level primitives over a single connection (or transaction).
#[async_trait]
pub(crate) trait CatalogOps: Send {
    async fn find_planet_id(&mut self, name: &str) -> Result<Option<i64>, StorageError>;

    async fn insert_planet(
        &mut self,
        ctx: &RequestContext,
        name: &str,
        population: Option<i64>,
    ) -> Result<i64, StorageError>;

    /// `None` leaves a column untouched. Always bumps the update audit columns.
    /// Returns `false` when no planet has `id`.
    async fn update_planet_fields(
        &mut self,
        ctx: &RequestContext,
        id: i64,
        name: Option<&str>,
        population: Option<Option<i64>>,
    ) -> Result<bool, StorageError>;

    /// Id of the tag named exactly `name`, inserting it when absent.
    async fn find_or_create_tag(
        &mut self,
        ctx: &RequestContext,
        kind: TagKind,
        name: &str,
    ) -> Result<i64, StorageError>;

    /// Make `tag_ids` the complete set of `kind` tags linked to the planet.
    async fn replace_planet_tags(
        &mut self,
        kind: TagKind,
        planet_id: i64,
        tag_ids: &[i64],
    ) -> Result<(), StorageError>;

    /// Planet row without its tags.
    async fn planet_row(&mut self, id: i64) -> Result<Option<Planet>, StorageError>;

    async fn planet_tag_names(
        &mut self,
        kind: TagKind,
        planet_id: i64,
    ) -> Result<Vec<String>, StorageError>;
}

/// Resolve raw names to tag rows, creating missing ones.
///
/// Names are trimmed, blanks dropped, and repeats collapsed, so the result
/// holds distinct ids in first-seen order. Matching is exact after trimming.
pub(crate) async fn normalize_tags<C: CatalogOps>(
    conn: &mut C,
    ctx: &RequestContext,
    kind: TagKind,
    names: &[String],
) -> Result<Vec<TagRef>, StorageError> {
    let mut tags = Vec::new();
    for name in normalize_tag_names(names) {
        let id = conn.find_or_create_tag(ctx, kind, &name).await?;
        tags.push(TagRef { id, name });
    }
    Ok(tags)
}

/// Find-or-create by name and apply whatever fields `input` carries.
pub(crate) async fn upsert_planet<C: CatalogOps>(
    conn: &mut C,
    ctx: &RequestContext,
    input: &PlanetUpsert,
) -> Result<UpsertOutcome, StorageError> {
    let (id, created) = match conn.find_planet_id(&input.name).await? {
        Some(id) => {
            conn.update_planet_fields(ctx, id, None, input.population).await?;
            (id, false)
        },
        None => {
            let id = conn.insert_planet(ctx, &input.name, input.population.flatten()).await?;
            (id, true)
        },
    };

    for kind in TagKind::ALL {
        if let Some(names) = input.tags(kind) {
            link_tags(conn, ctx, kind, id, names).await?;
        }
    }

    let planet = load_planet(conn, id).await?.ok_or_else(|| StorageError::not_found("planet", id))?;
    Ok(UpsertOutcome { planet, created })
}

/// Apply `patch` to an existing planet.
pub(crate) async fn update_planet<C: CatalogOps>(
    conn: &mut C,
    ctx: &RequestContext,
    id: i64,
    patch: &PlanetPatch,
) -> Result<Planet, StorageError> {
    if !conn.update_planet_fields(ctx, id, patch.name.as_deref(), patch.population).await? {
        return Err(StorageError::not_found("planet", id));
    }

    for kind in TagKind::ALL {
        if let Some(names) = patch.tags(kind) {
            link_tags(conn, ctx, kind, id, names).await?;
        }
    }

    load_planet(conn, id).await?.ok_or_else(|| StorageError::not_found("planet", id))
}

/// Planet with both tag lists, sorted by name.
pub(crate) async fn load_planet<C: CatalogOps>(
    conn: &mut C,
    id: i64,
) -> Result<Option<Planet>, StorageError> {
    let Some(mut planet) = conn.planet_row(id).await? else {
        return Ok(None);
    };
    planet.climates = conn.planet_tag_names(TagKind::Climate, id).await?;
    planet.terrains = conn.planet_tag_names(TagKind::Terrain, id).await?;
    Ok(Some(planet))
}

async fn link_tags<C: CatalogOps>(
    conn: &mut C,
    ctx: &RequestContext,
    kind: TagKind,
    planet_id: i64,
    names: &[String],
) -> Result<(), StorageError> {
    let tags = normalize_tags(conn, ctx, kind, names).await?;
    let ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
    conn.replace_planet_tags(kind, planet_id, &ids).await
}

/// Run `attempt`, and run it once more if it lost a unique-name race.
///
/// The loser of a concurrent find-or-create sees the winner's row on the second
/// pass. A second conflict is returned to the caller.
pub(crate) async fn retry_on_duplicate<T, F, Fut>(
    name: &str,
    mut attempt: F,
) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    match attempt().await {
        Err(err) if err.is_duplicate() => {
            tracing::debug!(name, error = %err, "planet upsert raced, retrying once");
            attempt().await
        },
        result => result,
    }
}

pub(crate) const PLANET_COLUMNS: &str =
    "id, name, population, created_at, updated_at, created_by, updated_by";

pub(crate) const TAG_COLUMNS: &str = "id, name, created_at, updated_at, created_by, updated_by";
