//! Response types (Serialize)

use planet_catalog_service::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Page-number pagination envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            count: page.count,
            page: page.page,
            page_size: page.page_size,
            next: page.next,
            previous: page.previous,
            results: page.items,
        }
    }
}
