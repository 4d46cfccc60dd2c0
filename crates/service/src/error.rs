//! Typed error enum for the service layer.
//!
//! Unifies validation, storage and remote failures into a single error type
//! that the HTTP boundary maps to status codes.

use planet_catalog_core::ValidationError;
use planet_catalog_storage::StorageError;
use planet_catalog_swapi::RemoteError;
use thiserror::Error;

/// Service-layer error unifying validation, storage and remote failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller input failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Remote planet source failed (network, timeout, status, body).
    #[error("upstream: {0}")]
    Upstream(#[from] RemoteError),

    /// Required collaborator (remote source) is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Entity with this id does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }

    pub(crate) const fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
