//! SQLite storage backend using sqlx.
//!
//! Mirrors the PostgreSQL backend so both run the same catalog algorithms;
//! used for local development and as the test backend.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod ops;
mod planets;
mod tags;

use std::path::Path;
use std::str::FromStr as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use planet_catalog_core::{
    Audit, Planet, PlanetUpsert, RequestContext, SQLITE_BUSY_TIMEOUT_SECS,
    SQLITE_POOL_MAX_CONNECTIONS, Tag,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Acquire, Row, Sqlite, SqlitePool, Transaction};

use crate::catalog;
use crate::error::StorageError;
use crate::types::UpsertOutcome;

use super::sqlite_migrations::run_sqlite_migrations;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Connect using a `sqlite://` URL, creating the file if missing.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?;
        Self::connect(options).await
    }

    /// Open (or create) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, StorageError> {
        Self::connect(SqliteConnectOptions::new().filename(db_path)).await
    }

    async fn connect(options: SqliteConnectOptions) -> Result<Self, StorageError> {
        let options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS));
        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_POOL_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        run_sqlite_migrations(&pool).await?;
        tracing::info!("SqliteStorage initialized");
        Ok(Self { pool })
    }

    /// Open a write transaction holding the database write lock from the start.
    ///
    /// A deferred `BEGIN` that reads before writing cannot wait for another
    /// writer in WAL mode: the lock upgrade fails with `SQLITE_BUSY` at once.
    /// `BEGIN IMMEDIATE` queues behind the busy timeout instead.
    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StorageError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    async fn upsert_once(
        &self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError> {
        let mut tx = self.begin().await?;
        let outcome = catalog::upsert_planet(&mut *tx, ctx, input).await?;
        tx.commit().await?;
        Ok(outcome)
    }
}

/// Run one upsert inside a savepoint of `tx`, rolling the savepoint back on failure.
pub(crate) async fn upsert_in_savepoint(
    tx: &mut Transaction<'static, Sqlite>,
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

fn row_to_audit(row: &SqliteRow) -> Result<Audit, StorageError> {
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
pub(crate) fn row_to_planet(row: &SqliteRow) -> Result<Planet, StorageError> {
    Ok(Planet {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        population: row.try_get("population")?,
        climates: Vec::new(),
        terrains: Vec::new(),
        audit: row_to_audit(row)?,
    })
}

pub(crate) fn row_to_tag(row: &SqliteRow) -> Result<Tag, StorageError> {
    Ok(Tag { id: row.try_get("id")?, name: row.try_get("name")?, audit: row_to_audit(row)? })
}
