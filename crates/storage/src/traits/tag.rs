use async_trait::async_trait;
use planet_catalog_core::{RequestContext, Tag, TagKind};

use crate::error::StorageError;
use crate::types::{ListQuery, PaginatedResult};

/// CRUD over the climate and terrain vocabularies.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Insert a new tag. `name` must already be trimmed.
    async fn create_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        name: &str,
    ) -> Result<Tag, StorageError>;

    async fn get_tag(&self, kind: TagKind, id: i64) -> Result<Option<Tag>, StorageError>;

    async fn rename_tag(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        id: i64,
        name: &str,
    ) -> Result<Tag, StorageError>;

    /// Delete by id, detaching it from every planet. Returns `true` if a row was deleted.
    async fn delete_tag(&self, kind: TagKind, id: i64) -> Result<bool, StorageError>;

    async fn list_tags(
        &self,
        kind: TagKind,
        query: &ListQuery,
    ) -> Result<PaginatedResult<Tag>, StorageError>;
}
