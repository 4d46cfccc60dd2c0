use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use planet_catalog_core::{Planet, PlanetPayload};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::Authorized;
use crate::query_types::ListParams;
use crate::response_types::PageResponse;

pub async fn list_planets(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PageResponse<Planet>>, ApiError> {
    let Query(params) = query?;
    let page = state.planet_service.list(&params.into()).await?;
    Ok(Json(page.into()))
}

/// Find-or-create by name: 201 when the planet is new, 200 when it was updated.
pub async fn upsert_planet(
    State(state): State<Arc<AppState>>,
    Authorized(ctx): Authorized,
    body: Result<Json<PlanetPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Planet>), ApiError> {
    let Json(payload) = body?;
    let outcome = state.planet_service.upsert(&ctx, payload).await?;
    let status = if outcome.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(outcome.planet)))
}

pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.planet_service.get(id).await?))
}

/// PUT: `name` is required.
pub async fn replace_planet(
    State(state): State<Arc<AppState>>,
    Authorized(ctx): Authorized,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PlanetPayload>, JsonRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    Ok(Json(state.planet_service.update(&ctx, id, payload, true).await?))
}

/// PATCH: only the fields present in the body change.
pub async fn patch_planet(
    State(state): State<Arc<AppState>>,
    Authorized(ctx): Authorized,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<PlanetPayload>, JsonRejection>,
) -> Result<Json<Planet>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    Ok(Json(state.planet_service.update(&ctx, id, payload, false).await?))
}

pub async fn delete_planet(
    State(state): State<Arc<AppState>>,
    Authorized(_ctx): Authorized,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.planet_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
