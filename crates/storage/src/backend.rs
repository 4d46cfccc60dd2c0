//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
use planet_catalog_core::{Planet, PlanetPatch, PlanetUpsert, RequestContext, Tag, TagKind};

use crate::error::StorageError;
use crate::traits::{PlanetStore, TagStore};
use crate::types::{ListQuery, PaginatedResult, UpsertOutcome};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::SqliteStorage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStorage),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgStorage),
}

impl StorageBackend {
    /// Pick the backend from the URL scheme (`postgres://`, `postgresql://`, `sqlite:`).
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        #[cfg(feature = "postgres")]
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            return Self::new_postgres(database_url).await;
        }
        #[cfg(feature = "sqlite")]
        if database_url.starts_with("sqlite:") {
            return Ok(Self::Sqlite(crate::SqliteStorage::new(database_url).await?));
        }
        Err(StorageError::UnsupportedUrl(redact(database_url).to_owned()))
    }

    #[cfg(feature = "sqlite")]
    pub async fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteStorage::open(db_path).await?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::PgStorage::new(database_url).await?))
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }

    /// Start an import batch: one outer transaction, one savepoint per item.
    pub async fn begin_import(&self) -> Result<ImportBatch, StorageError> {
        Ok(match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(s) => ImportBatch::Sqlite(s.begin().await?),
            #[cfg(feature = "postgres")]
            Self::Postgres(s) => ImportBatch::Postgres(s.begin().await?),
        })
    }
}

/// Keep only the scheme so credentials never reach logs or error bodies.
fn redact(url: &str) -> &str {
    url.split_once(':').map_or("<none>", |(scheme, _)| scheme)
}

/// The outer transaction of one sync run.
///
/// Each [`ImportBatch::upsert_planet`] call runs in its own savepoint, so a
/// failing item leaves earlier items intact. Nothing is visible to other
/// connections until [`ImportBatch::commit`]; dropping the batch rolls back.
pub enum ImportBatch {
    #[cfg(feature = "sqlite")]
    Sqlite(sqlx::Transaction<'static, sqlx::Sqlite>),
    #[cfg(feature = "postgres")]
    Postgres(sqlx::Transaction<'static, sqlx::Postgres>),
}

impl std::fmt::Debug for ImportBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        };
        f.debug_struct("ImportBatch").field("backend", &backend).finish_non_exhaustive()
    }
}

impl ImportBatch {
    /// Upsert one item inside a savepoint. A unique-name race is retried once.
    pub async fn upsert_planet(
        &mut self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError> {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(tx) => match crate::sqlite_storage::upsert_in_savepoint(tx, ctx, input).await {
                Err(err) if err.is_duplicate() => {
                    tracing::debug!(name = %input.name, "import item raced, retrying once");
                    crate::sqlite_storage::upsert_in_savepoint(tx, ctx, input).await
                },
                result => result,
            },
            #[cfg(feature = "postgres")]
            Self::Postgres(tx) => match crate::pg_storage::upsert_in_savepoint(tx, ctx, input).await {
                Err(err) if err.is_duplicate() => {
                    tracing::debug!(name = %input.name, "import item raced, retrying once");
                    crate::pg_storage::upsert_in_savepoint(tx, ctx, input).await
                },
                result => result,
            },
        }
    }

    pub async fn commit(self) -> Result<(), StorageError> {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(tx) => tx.commit().await?,
            #[cfg(feature = "postgres")]
            Self::Postgres(tx) => tx.commit().await?,
        }
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), StorageError> {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(tx) => tx.rollback().await?,
            #[cfg(feature = "postgres")]
            Self::Postgres(tx) => tx.rollback().await?,
        }
        Ok(())
    }
}

// ── PlanetStore ──────────────────────────────────────────────────

#[async_trait]
impl PlanetStore for StorageBackend {
    async fn upsert_planet(
        &self,
        ctx: &RequestContext,
        input: &PlanetUpsert,
    ) -> Result<UpsertOutcome, StorageError> {
        dispatch!(self, PlanetStore, upsert_planet(ctx, input))
    }

    async fn update_planet(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: &PlanetPatch,
    ) -> Result<Planet, StorageError> {
        dispatch!(self, PlanetStore, update_planet(ctx, id, patch))
    }

    async fn get_planet(&self, id: i64) -> Result<Option<Planet>, StorageError> {
        dispatch!(self, PlanetStore, get_planet(id))
    }

    async fn delete_planet(&self, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, PlanetStore, delete_planet(id))
    }

    async fn list_planets(
        &self,
        query: &ListQuery,
    ) -> Result<PaginatedResult<Planet>, StorageError> {
        dispatch!(self, PlanetStore, list_planets(query))
    }
}

// ── TagStore ─────────────────────────────────────────────────────

#[async_trait]
impl TagStore for StorageBackend {
    async fn create_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        name: &str,
    ) -> Result<Tag, StorageError> {
        dispatch!(self, TagStore, create_tag(ctx, kind, name))
    }

    async fn get_tag(&self, kind: TagKind, id: i64) -> Result<Option<Tag>, StorageError> {
        dispatch!(self, TagStore, get_tag(kind, id))
    }

    async fn rename_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        id: i64,
        name: &str,
    ) -> Result<Tag, StorageError> {
        dispatch!(self, TagStore, rename_tag(ctx, kind, id, name))
    }

    async fn delete_tag(&self, kind: TagKind, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, TagStore, delete_tag(kind, id))
    }

    async fn list_tags(
        &self,
        kind: TagKind,
        query: &ListQuery,
    ) -> Result<PaginatedResult<Tag>, StorageError> {
        dispatch!(self, TagStore, list_tags(kind, query))
    }
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_keeps_only_scheme() {
        assert_eq!(redact("mysql://user:secret@db/catalog"), "mysql");
        assert_eq!(redact("nonsense"), "<none>");
    }
}
