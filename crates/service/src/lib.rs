//! Service layer for planet-catalog
//!
//! Centralizes business logic between HTTP/CLI handlers and storage/remote.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod page;
mod planet_service;
mod sync_service;
mod tag_service;

pub use error::ServiceError;
pub use page::{Page, PageRequest};
pub use planet_service::PlanetService;
pub use sync_service::{SyncFailure, SyncReport, SyncService};
pub use tag_service::TagService;

#[cfg(test)]
mod tests;
