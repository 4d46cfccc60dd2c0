//! TagStore implementation for PgStorage.

use async_trait::async_trait;
use chrono::Utc;
use planet_catalog_core::{RequestContext, Tag, TagKind};

use super::{PgStorage, row_to_tag};
use crate::catalog::TAG_COLUMNS;
use crate::error::StorageError;
use crate::traits::TagStore;
use crate::types::{ListQuery, PaginatedResult, count_to_u64, u64_to_i64};

#[async_trait]
impl TagStore for PgStorage {
    async fn create_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        name: &str,
    ) -> Result<Tag, StorageError> {
        let row = sqlx::query(&format!(
            "INSERT INTO {table} (name, created_at, updated_at, created_by, updated_by)
             VALUES ($1, $2, $2, $3, $3)
             RETURNING {TAG_COLUMNS}",
            table = kind.table(),
        ))
        .bind(name)
        .bind(Utc::now())
        .bind(ctx.actor())
        .fetch_one(&self.pool)
        .await?;
        row_to_tag(&row)
    }

    async fn get_tag(&self, kind: TagKind, id: i64) -> Result<Option<Tag>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {TAG_COLUMNS} FROM {table} WHERE id = $1",
            table = kind.table(),
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_tag(&r)).transpose()
    }

    async fn rename_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        id: i64,
        name: &str,
    ) -> Result<Tag, StorageError> {
        let row = sqlx::query(&format!(
            "UPDATE {table} SET name = $1, updated_at = $2, updated_by = $3
             WHERE id = $4
             RETURNING {TAG_COLUMNS}",
            table = kind.table(),
        ))
        .bind(name)
        .bind(Utc::now())
        .bind(ctx.actor())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => row_to_tag(&row),
            None => Err(StorageError::not_found(kind.as_str(), id)),
        }
    }

    async fn delete_tag(&self, kind: TagKind, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1", table = kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_tags(
        &self,
        kind: TagKind,
        query: &ListQuery,
    ) -> Result<PaginatedResult<Tag>, StorageError> {
        let table = kind.table();
        let pattern = query.like_pattern();

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {table}
             WHERE $1::TEXT IS NULL OR LOWER(name) LIKE $1 ESCAPE '\\'"
        ))
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(&format!(
            "SELECT {TAG_COLUMNS} FROM {table}
             WHERE $1::TEXT IS NULL OR LOWER(name) LIKE $1 ESCAPE '\\'
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        ))
        .bind(pattern.as_deref())
        .bind(u64_to_i64(query.limit))
        .bind(u64_to_i64(query.offset))
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(row_to_tag).collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedResult {
            items,
            total: count_to_u64(total),
            offset: query.offset,
            limit: query.limit,
        })
    }
}
