//! Import of the remote planet list.
//!
//! One run fetches every item first, then upserts them inside a single
//! [`ImportBatch`]. Each item gets its own savepoint, so a bad item is
//! recorded in the report and skipped without touching the others.

use std::sync::Arc;
use std::time::{Duration, Instant};

use planet_catalog_core::{REMOTE_NOT_CONFIGURED, RequestContext};
use planet_catalog_storage::{ImportBatch, StorageBackend, StorageError};
use planet_catalog_swapi::{SwapiClient, item_identifier, map_remote_planet};
use serde::Serialize;
use serde_json::Value;

use crate::ServiceError;

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub imported: usize,
    pub failures: Vec<SyncFailure>,
}

/// One item that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    /// Trimmed planet name, or `#<position>` when the item has none.
    pub name: String,
    pub reason: String,
}

pub struct SyncService {
    storage: Arc<StorageBackend>,
    remote: Option<SwapiClient>,
}

impl SyncService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, remote: Option<SwapiClient>) -> Self {
        Self { storage, remote }
    }

    /// Build the remote client when `planets_url` is set.
    pub fn from_config(
        storage: Arc<StorageBackend>,
        planets_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let remote = planets_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| SwapiClient::new(url, timeout))
            .transpose()?;
        Ok(Self::new(storage, remote))
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    /// Fetch the remote list and upsert every item.
    ///
    /// Fails before any write when the remote is not configured or
    /// unreachable. Per-item problems end up in [`SyncReport::failures`].
    pub async fn sync_from_remote(&self, ctx: &RequestContext) -> Result<SyncReport, ServiceError> {
        let Some(remote) = &self.remote else {
            return Err(ServiceError::NotConfigured(REMOTE_NOT_CONFIGURED.to_owned()));
        };

        let started = Instant::now();
        tracing::info!(url = remote.planets_url(), "planet sync started");

        let items = remote.fetch_planets().await.inspect_err(|e| {
            tracing::warn!(error = %e, "planet sync aborted: remote fetch failed");
        })?;

        let mut batch = self.storage.begin_import().await?;
        let mut report = SyncReport::default();
        for (index, item) in items.iter().enumerate() {
            let name = item_identifier(item, index);
            match import_item(&mut batch, ctx, item).await {
                Ok(()) => report.imported += 1,
                Err(reason) => {
                    tracing::warn!(item = %name, reason = %reason, "planet import failed");
                    report.failures.push(SyncFailure { name, reason });
                },
            }
        }
        batch.commit().await?;

        tracing::info!(
            fetched = items.len(),
            imported = report.imported,
            failed = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "planet sync finished"
        );
        Ok(report)
    }
}

/// Map, validate and upsert one item. The error is the user-facing reason.
async fn import_item(
    batch: &mut ImportBatch,
    ctx: &RequestContext,
    item: &Value,
) -> Result<(), String> {
    let payload = map_remote_planet(item)?;
    let input = payload.into_upsert().map_err(|e| e.to_string())?;
    match batch.upsert_planet(ctx, &input).await {
        Ok(_) => Ok(()),
        Err(StorageError::Duplicate(_)) => {
            Err("conflict: a planet with this name was written concurrently".to_owned())
        },
        Err(err) => {
            tracing::error!(name = %input.name, error = ?err, "planet import persistence error");
            Err("persistence error".to_owned())
        },
    }
}
