use std::sync::Arc;

use anyhow::Result;
use planet_catalog_core::{CatalogConfig, RequestContext};
use planet_catalog_service::SyncService;

use crate::connect_storage;

/// Actor recorded in audit columns for CLI imports.
const CLI_ACTOR: &str = "cli-sync";

pub(crate) async fn run(config: &CatalogConfig) -> Result<()> {
    let storage = Arc::new(connect_storage(config).await?);
    let service = SyncService::from_config(
        storage,
        config.swapi_planets_url.as_deref(),
        config.swapi_timeout,
    )?;

    let report = service.sync_from_remote(&RequestContext::new(CLI_ACTOR)).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
