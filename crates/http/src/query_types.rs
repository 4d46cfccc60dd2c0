//! Query parameter types (Deserialize)

use planet_catalog_service::PageRequest;
use serde::Deserialize;

/// `?page=&page_size=&search=` on every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
}

impl From<ListParams> for PageRequest {
    fn from(params: ListParams) -> Self {
        Self { page: params.page, page_size: params.page_size, search: params.search }
    }
}
