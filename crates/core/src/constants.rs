//! Shared constants for planet-catalog.

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// SQLite connection pool: maximum connections.
pub const SQLITE_POOL_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds (writers wait instead of failing with `SQLITE_BUSY`).
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// Page size when the caller does not pass `page_size`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for `page_size` (DoS protection).
pub const MAX_PAGE_SIZE: u32 = 100;

/// Outbound timeout for the remote planet source.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 15;

/// Maximum length of planet and tag names.
pub const MAX_NAME_LEN: usize = 100;

/// Error message when the remote planet source is not configured.
pub const REMOTE_NOT_CONFIGURED: &str =
    "remote planet source not configured (SWAPI_PLANETS_URL not set)";

/// Database used when neither `DATABASE_URL` nor `POSTGRES_DB` is set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://planet-catalog.db";
