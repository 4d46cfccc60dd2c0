//! Value types shared by every store implementation.

use planet_catalog_core::Planet;

/// One page of results plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// Offset from the start.
    pub offset: u64,
    /// Maximum items per page.
    pub limit: u64,
}

/// Filtering and paging for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring match on `name`.
    pub search: Option<String>,
    pub offset: u64,
    pub limit: u64,
}

impl ListQuery {
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { search: None, offset, limit }
    }

    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        self
    }

    /// `LIKE` pattern for the search term, already lowercased and escaped.
    pub(crate) fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|s| format!("%{}%", escape_like(&s.to_lowercase())))
    }
}

/// Result of a find-or-create by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub planet: Planet,
    /// `true` when no planet with that name existed before.
    pub created: bool,
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Convert `u64` to `i64` for SQL LIMIT/OFFSET binds.
pub(crate) fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

/// Convert a SQL `COUNT(*)` back to `u64`.
pub(crate) fn count_to_u64(val: i64) -> u64 {
    u64::try_from(val).unwrap_or(0)
}
