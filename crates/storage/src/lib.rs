//! Storage layer for planet-catalog
//!
//! sqlx-based persistence for planets, climates and terrains, with a
//! PostgreSQL backend for deployment and a SQLite backend for local runs and
//! tests. Both run the same upsert and tag-normalization algorithms.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]
#![allow(clippy::missing_errors_doc, reason = "every fallible fn returns StorageError")]

mod backend;
mod catalog;
pub mod error;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
pub mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_migrations;
#[cfg(feature = "sqlite")]
pub mod sqlite_storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;
mod types;

pub use backend::{ImportBatch, StorageBackend};
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use sqlite_storage::SqliteStorage;
pub use traits::{PlanetStore, TagStore};
pub use types::{ListQuery, PaginatedResult, UpsertOutcome};
