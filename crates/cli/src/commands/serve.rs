use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use planet_catalog_core::CatalogConfig;
use planet_catalog_http::{AppState, create_router};

use crate::connect_storage;

pub(crate) async fn run(config: &CatalogConfig, addr: SocketAddr) -> Result<()> {
    let storage = Arc::new(connect_storage(config).await?);

    if config.api_token.is_none() {
        tracing::warn!("PLANET_CATALOG_API_TOKEN not set, mutating endpoints are open to any caller");
    }
    if config.swapi_planets_url.is_none() {
        tracing::info!("SWAPI_PLANETS_URL not set, /planets/sync will report a configuration error");
    }

    let state = Arc::new(AppState::new(storage, config)?);
    let router = create_router(state);
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
