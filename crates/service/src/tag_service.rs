use std::sync::Arc;

use planet_catalog_core::{RequestContext, Tag, TagKind, TagPayload};
use planet_catalog_storage::{StorageBackend, TagStore};

use crate::{Page, PageRequest, ServiceError};

/// Climate and terrain CRUD. Every call names the vocabulary it works on.
pub struct TagService {
    storage: Arc<StorageBackend>,
}

impl TagService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        payload: TagPayload,
    ) -> Result<Tag, ServiceError> {
        let name = payload.into_name()?;
        Ok(self.storage.create_tag(ctx, kind, &name).await?)
    }

    pub async fn get(&self, kind: TagKind, id: i64) -> Result<Tag, ServiceError> {
        self.storage.get_tag(kind, id).await?.ok_or_else(|| ServiceError::not_found(kind.as_str(), id))
    }

    pub async fn rename(
        &self,
        ctx: &RequestContext,
        kind: TagKind,
        id: i64,
        payload: TagPayload,
    ) -> Result<Tag, ServiceError> {
        let name = payload.into_name()?;
        Ok(self.storage.rename_tag(ctx, kind, id, &name).await?)
    }

    pub async fn delete(&self, kind: TagKind, id: i64) -> Result<(), ServiceError> {
        if self.storage.delete_tag(kind, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(kind.as_str(), id))
        }
    }

    pub async fn list(&self, kind: TagKind, request: &PageRequest) -> Result<Page<Tag>, ServiceError> {
        let (page, page_size, query) = request.resolve()?;
        let result = self.storage.list_tags(kind, &query).await?;
        Ok(Page::from_result(result, page, page_size))
    }
}
