//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod ops;
mod planets;
mod tags;

use chrono::{DateTime, Utc};
use planet_catalog_core::{
    Audit, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
    Planet, PlanetUpsert, RequestContext, Tag,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Acquire, PgPool, Postgres, Row, Transaction};

use crate::catalog;
use crate::error::StorageError;
use crate::types::UpsertOutcome;

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    /// Open the outer transaction of an import batch.
    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Postgres>, StorageError> {
        Ok(self.pool.begin().await?)
    }

    async fn upsert_once(
        &self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError> {
        let mut tx = self.pool.begin().await?;
        let outcome = catalog::upsert_planet(&mut *tx, ctx, input).await?;
        tx.commit().await?;
        Ok(outcome)
    }
}

/// Run one upsert inside a savepoint of `tx`, rolling the savepoint back on failure.
pub(crate) async fn upsert_in_savepoint(
    tx: &mut Transaction<'static, Postgres>,
    ctx: &RequestContext,
    input: &PlanetUpsert,
) -> Result<UpsertOutcome, StorageError> {
    let mut savepoint = tx.begin().await?;
    match catalog::upsert_planet(&mut *savepoint, ctx, input).await {
        Ok(outcome) => {
            savepoint.commit().await?;
            Ok(outcome)
        },
        Err(err) => {
            savepoint.rollback().await?;
            Err(err)
        },
    }
}

fn row_to_audit(row: &PgRow) -> Result<Audit, StorageError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
    Ok(Audit {
        created_at,
        updated_at,
        created_by: row.try_get("created_by")?,
        updated_by: row.try_get("updated_by")?,
    })
}

/// Planet columns only; tag lists are filled in by the caller.
pub(crate) fn row_to_planet(row: &PgRow) -> Result<Planet, StorageError> {
    Ok(Planet {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        population: row.try_get("population")?,
        climates: Vec::new(),
        terrains: Vec::new(),
        audit: row_to_audit(row)?,
    })
}

pub(crate) fn row_to_tag(row: &PgRow) -> Result<Tag, StorageError> {
    Ok(Tag { id: row.try_get("id")?, name: row.try_get("name")?, audit: row_to_audit(row)? })
}
