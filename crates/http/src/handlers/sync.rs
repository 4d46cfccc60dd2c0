use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use planet_catalog_service::SyncReport;

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::Authorized;

/// Run one import from the remote planet source.
pub async fn sync_planets(
    State(state): State<Arc<AppState>>,
    Authorized(ctx): Authorized,
) -> Result<Json<SyncReport>, ApiError> {
    Ok(Json(state.sync_service.sync_from_remote(&ctx).await?))
}
