//! Typed API error for HTTP handlers.
//!
//! The one place where service errors become status codes. Every body is
//! `{"error": "message"}`; validation failures add a `fields` map.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use planet_catalog_core::ValidationError;
use planet_catalog_service::ServiceError;
use planet_catalog_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// `Internal` logs the real error server-side and returns a static message.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with per-field messages.
    Validation(ValidationError),
    /// 400 for malformed requests (unparseable body or query).
    BadRequest(String),
    /// 400 when the `Host` header is not in the allow-list.
    DisallowedHost(String),
    /// 401 for a missing or wrong bearer token.
    Unauthorized,
    NotFound(String),
    /// 409 when a unique name is already taken.
    Conflict(String),
    /// 500 when a required collaborator is not configured.
    NotConfigured(String),
    /// 502 when the remote planet source failed.
    Upstream(String),
    /// 500, details logged only.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(err) => {
                let body = serde_json::json!({"error": "invalid input", "fields": err.fields()});
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            },
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::DisallowedHost(host) => {
                tracing::warn!(host = %host, "rejected request for disallowed host");
                (StatusCode::BAD_REQUEST, format!("invalid host header: {host}"))
            },
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid or missing bearer token".to_owned()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::NotConfigured(msg) => {
                tracing::error!(reason = %msg, "configuration error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            },
            Self::Upstream(msg) => {
                tracing::warn!(reason = %msg, "remote planet source failed");
                (StatusCode::BAD_GATEWAY, msg)
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e),
            ServiceError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id} not found")),
            ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} {id} not found"))
            },
            ServiceError::Storage(ref e) if e.is_duplicate() => {
                Self::Conflict("a record with this name already exists".to_owned())
            },
            ServiceError::NotConfigured(msg) => Self::NotConfigured(msg),
            ServiceError::Upstream(e) => Self::Upstream(format!("remote planet source failed: {e}")),
            _ => Self::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Ids that do not parse are reported like ids that do not exist.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::NotFound("not found".to_owned())
    }
}
