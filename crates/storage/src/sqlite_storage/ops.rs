//! Row-level catalog primitives on a SQLite connection.

use async_trait::async_trait;
use chrono::Utc;
use planet_catalog_core::{Planet, RequestContext, TagKind};
use sqlx::SqliteConnection;

use super::row_to_planet;
use crate::catalog::{CatalogOps, PLANET_COLUMNS};
use crate::error::StorageError;

#[async_trait]
impl CatalogOps for SqliteConnection {
    async fn find_planet_id(&mut self, name: &str) -> Result<Option<i64>, StorageError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM planets WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self)
            .await?;
        Ok(id)
    }

    async fn insert_planet(
        &mut self,
        ctx: &RequestContext,
        name: &str,
        population: Option<i64>,
    ) -> Result<i64, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO planets (name, population, created_at, updated_at, created_by, updated_by)
             VALUES ($1, $2, $3, $3, $4, $4)
             RETURNING id",
        )
        .bind(name)
        .bind(population)
        .bind(Utc::now())
        .bind(ctx.actor())
        .fetch_one(&mut *self)
        .await?;
        Ok(id)
    }

    async fn update_planet_fields(
        &mut self,
        ctx: &RequestContext,
        id: i64,
        name: Option<&str>,
        population: Option<Option<i64>>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE planets SET
               name = COALESCE($1, name),
               population = CASE WHEN $2 THEN $3 ELSE population END,
               updated_at = $4,
               updated_by = $5
             WHERE id = $6",
        )
        .bind(name)
        .bind(population.is_some())
        .bind(population.flatten())
        .bind(Utc::now())
        .bind(ctx.actor())
        .bind(id)
        .execute(&mut *self)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_or_create_tag(
        &mut self,
        ctx: &RequestContext,
        kind: TagKind,
        name: &str,
    ) -> Result<i64, StorageError> {
        let table = kind.table();
        sqlx::query(&format!(
            "INSERT INTO {table} (name, created_at, updated_at, created_by, updated_by)
             VALUES ($1, $2, $2, $3, $3)
             ON CONFLICT (name) DO NOTHING"
        ))
        .bind(name)
        .bind(Utc::now())
        .bind(ctx.actor())
        .execute(&mut *self)
        .await?;

        let id = sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {table} WHERE name = $1"))
            .bind(name)
            .fetch_one(&mut *self)
            .await?;
        Ok(id)
    }

    async fn replace_planet_tags(
        &mut self,
        kind: TagKind,
        planet_id: i64,
        tag_ids: &[i64],
    ) -> Result<(), StorageError> {
        let link = kind.link_table();
        let column = kind.link_column();
        sqlx::query(&format!("DELETE FROM {link} WHERE planet_id = $1"))
            .bind(planet_id)
            .execute(&mut *self)
            .await?;
        let insert = format!(
            "INSERT INTO {link} (planet_id, {column}) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        );
        for tag_id in tag_ids {
            sqlx::query(&insert).bind(planet_id).bind(*tag_id).execute(&mut *self).await?;
        }
        Ok(())
    }

    async fn planet_row(&mut self, id: i64) -> Result<Option<Planet>, StorageError> {
        let row = sqlx::query(&format!("SELECT {PLANET_COLUMNS} FROM planets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self)
            .await?;
        row.map(|r| row_to_planet(&r)).transpose()
    }

    async fn planet_tag_names(
        &mut self,
        kind: TagKind,
        planet_id: i64,
    ) -> Result<Vec<String>, StorageError> {
        let mut names = sqlx::query_scalar::<_, String>(&format!(
            "SELECT t.name FROM {table} t
             JOIN {link} l ON l.{column} = t.id
             WHERE l.planet_id = $1",
            table = kind.table(),
            link = kind.link_table(),
            column = kind.link_column(),
        ))
        .bind(planet_id)
        .fetch_all(&mut *self)
        .await?;
        names.sort();
        Ok(names)
    }
}
