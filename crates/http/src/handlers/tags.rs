//! Climate and terrain endpoints. The router attaches the [`TagKind`] as an
//! extension, so one set of handlers serves both vocabularies.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use planet_catalog_core::{Tag, TagKind, TagPayload};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::Authorized;
use crate::query_types::ListParams;
use crate::response_types::PageResponse;

pub async fn list_tags(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TagKind>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<PageResponse<Tag>>, ApiError> {
    let Query(params) = query?;
    let page = state.tag_service.list(kind, &params.into()).await?;
    Ok(Json(page.into()))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TagKind>,
    Authorized(ctx): Authorized,
    body: Result<Json<TagPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    let Json(payload) = body?;
    let tag = state.tag_service.create(&ctx, kind, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TagKind>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Tag>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.tag_service.get(kind, id).await?))
}

/// PUT and PATCH both rename: `name` is the only field.
pub async fn rename_tag(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TagKind>,
    Authorized(ctx): Authorized,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<TagPayload>, JsonRejection>,
) -> Result<Json<Tag>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    Ok(Json(state.tag_service.rename(&ctx, kind, id, payload).await?))
}

pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TagKind>,
    Authorized(_ctx): Authorized,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.tag_service.delete(kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
