//! SQLite schema migrations for the planet catalog.

use sqlx::SqlitePool;

use crate::error::StorageError;

/// Run all SQLite migrations. Every statement is idempotent.
pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS planets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            population INTEGER CHECK (population IS NULL OR population >= 0),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            created_by TEXT,
            updated_by TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    for table in ["climates", "terrains"] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                created_by TEXT,
                updated_by TEXT
            )
            "#
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
                planet_id INTEGER NOT NULL REFERENCES planets (id) ON DELETE CASCADE,
                {column} INTEGER NOT NULL REFERENCES {tags} (id) ON DELETE CASCADE,
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

    tracing::debug!("SQLite migrations applied");
    Ok(())
}
