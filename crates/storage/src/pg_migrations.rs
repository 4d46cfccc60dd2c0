//! PostgreSQL schema migrations for the planet catalog.

use sqlx::PgPool;

use crate::error::StorageError;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            population BIGINT CHECK (population IS NULL OR population >= 0),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            created_by TEXT,
            updated_by TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_planets_name ON planets (name)")
        .execute(pool)
        .await?;

    for table in ["climates", "terrains"] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                created_by TEXT,
                updated_by TEXT
            )
            "#
        ))
        .execute(pool)
        .await?;

        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_{table}_name ON {table} (name)"
        ))
        .execute(pool)
        .await?;
    }

    for (link, tags, column) in
        [("planet_climates", "climates", "climate_id"), ("planet_terrains", "terrains", "terrain_id")]
    {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {link} (
                planet_id BIGINT NOT NULL REFERENCES planets (id) ON DELETE CASCADE,
                {column} BIGINT NOT NULL REFERENCES {tags} (id) ON DELETE CASCADE,
                PRIMARY KEY (planet_id, {column})
            )
            "#
        ))
        .execute(pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{link}_{column} ON {link} ({column})"
        ))
        .execute(pool)
        .await?;
    }

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
