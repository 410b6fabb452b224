use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::validation::{FieldErrors, Validate};

/// Upper bound on rows per page
pub const MAX_PAGE_SIZE: u64 = 1000;
pub const DEFAULT_PAGE_SIZE: u64 = 20;

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Pagination query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
pub struct PageParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Rows per page (clamped to 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageParams {
    /// Page size after applying the upper bound
    pub fn limit(&self) -> u64 {
        self.page_size.min(MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit())
    }
}

impl Validate for PageParams {
    fn validate(&self, errors: &mut FieldErrors) {
        errors
            .check(self.page >= 1, "page", "page must be at least 1")
            .check(self.page_size >= 1, "page_size", "page_size must be at least 1");
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PageParams) -> Self {
        let page_size = params.limit().max(1);
        let total_pages = total.div_ceil(page_size);
        Self {
            items,
            total,
            page: params.page,
            page_size,
            total_pages,
            has_more: params.page < total_pages,
        }
    }
}
