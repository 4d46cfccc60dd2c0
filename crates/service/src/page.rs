//! Page-number pagination on top of offset/limit storage queries.

use planet_catalog_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, ValidationError};
use planet_catalog_storage::{ListQuery, PaginatedResult};

/// Requested page, 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

impl PageRequest {
    pub(crate) fn resolve(&self) -> Result<(u32, u32, ListQuery), ValidationError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(ValidationError::field("page", "Invalid page."));
        }
        let page_size = match self.page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(0) => return Err(ValidationError::field("page_size", "Invalid page size.")),
            Some(size) => size.min(MAX_PAGE_SIZE),
        };
        let offset = u64::from(page - 1) * u64::from(page_size);
        let query = ListQuery::new(offset, u64::from(page_size)).with_search(self.search.clone());
        Ok((page, page_size, query))
    }
}

/// One page of results with its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub next: Option<u32>,
    pub previous: Option<u32>,
}

impl<T> Page<T> {
    pub(crate) fn from_result(result: PaginatedResult<T>, page: u32, page_size: u32) -> Self {
        let seen = result.offset + result.items.len() as u64;
        Self {
            next: (seen < result.total).then(|| page.saturating_add(1)),
            previous: (page > 1).then(|| page - 1),
            items: result.items,
            count: result.total,
            page,
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let (page, size, query) = PageRequest::default().resolve().unwrap();
        assert_eq!((page, size), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, u64::from(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn page_size_is_capped() {
        let request = PageRequest { page: Some(3), page_size: Some(1000), search: None };
        let (_, size, query) = request.resolve().unwrap();
        assert_eq!(size, MAX_PAGE_SIZE);
        assert_eq!(query.offset, 2 * u64::from(MAX_PAGE_SIZE));
    }

    #[test]
    fn zero_page_is_rejected() {
        let request = PageRequest { page: Some(0), ..PageRequest::default() };
        assert!(request.resolve().is_err());
    }

    #[test]
    fn neighbours() {
        let result = PaginatedResult { items: vec![1, 2], total: 5, offset: 2, limit: 2 };
        let page = Page::from_result(result, 2, 2);
        assert_eq!(page.next, Some(3));
        assert_eq!(page.previous, Some(1));

        let last = PaginatedResult { items: vec![5], total: 5, offset: 4, limit: 2 };
        assert_eq!(Page::from_result(last, 3, 2).next, None);
    }
}
