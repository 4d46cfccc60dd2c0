//! Storage backend trait abstraction
//!
//! Defines async domain traits for catalog storage, implemented by the
//! PostgreSQL and SQLite backends and dispatched through
//! [`crate::StorageBackend`].

pub mod planet;
pub mod tag;

pub use planet::PlanetStore;
pub use tag::TagStore;
