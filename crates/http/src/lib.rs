//! HTTP API server for planet-catalog.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
pub mod auth;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::routing::{MethodRouter, get};
use axum::{Extension, Json, Router, middleware};
use planet_catalog_core::{CatalogConfig, TagKind};
use planet_catalog_service::{PlanetService, ServiceError, SyncService, TagService};
use planet_catalog_storage::StorageBackend;
use tower_http::trace::TraceLayer;

pub use response_types::{PageResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for sharing across handlers.
pub struct AppState {
    pub planet_service: PlanetService,
    pub tag_service: TagService,
    pub sync_service: SyncService,
    /// Bearer token required on mutations; `None` leaves them open.
    pub api_token: Option<String>,
    /// Accepted `Host` values; empty accepts any.
    pub allowed_hosts: Vec<String>,
}

impl AppState {
    /// Wire the services over `storage` and build the remote client if configured.
    pub fn new(storage: Arc<StorageBackend>, config: &CatalogConfig) -> Result<Self, ServiceError> {
        let sync_service = SyncService::from_config(
            Arc::clone(&storage),
            config.swapi_planets_url.as_deref(),
            config.swapi_timeout,
        )?;
        Ok(Self {
            planet_service: PlanetService::new(Arc::clone(&storage)),
            tag_service: TagService::new(storage),
            sync_service,
            api_token: config.api_token.clone(),
            allowed_hosts: config.allowed_hosts.clone(),
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let planets = get(handlers::planets::list_planets).post(handlers::planets::upsert_planet);
    let planet = get(handlers::planets::get_planet)
        .put(handlers::planets::replace_planet)
        .patch(handlers::planets::patch_planet)
        .delete(handlers::planets::delete_planet);
    let sync = get(handlers::sync::sync_planets).post(handlers::sync::sync_planets);

    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/planets", planets.clone())
        .route("/planets/", planets)
        .route("/planets/sync", sync.clone())
        .route("/planets/sync/", sync)
        .route("/planets/{id}", planet.clone())
        .route("/planets/{id}/", planet)
        .merge(tag_routes("climates", TagKind::Climate))
        .merge(tag_routes("terrains", TagKind::Terrain))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), auth::enforce_allowed_hosts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Collection and item routes for one tag vocabulary, with and without the
/// trailing slash.
fn tag_routes(collection: &str, kind: TagKind) -> Router<Arc<AppState>> {
    let list: MethodRouter<Arc<AppState>> =
        get(handlers::tags::list_tags).post(handlers::tags::create_tag);
    let item: MethodRouter<Arc<AppState>> = get(handlers::tags::get_tag)
        .put(handlers::tags::rename_tag)
        .patch(handlers::tags::rename_tag)
        .delete(handlers::tags::delete_tag);

    Router::new()
        .route(&format!("/{collection}"), list.clone())
        .route(&format!("/{collection}/"), list)
        .route(&format!("/{collection}/{{id}}"), item.clone())
        .route(&format!("/{collection}/{{id}}/"), item)
        .layer(Extension(kind))
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod tests;
