//! Query parameter types for the book handlers.
//!
//! Values are kept as raw strings so that non-numeric input degrades to `0`
//! (and is then floored by the service) instead of rejecting the request.

use booklib_core::pagination::{parse_page_param, DEFAULT_PAGE_SIZE, FIRST_PAGE};

use crate::extract::QueryPairs;

/// Pagination parameters (`?page=&page_size=`).
#[derive(Debug, Default)]
pub struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageParams {
    /// Raw `(page, page_size)`, defaulting absent values to `1` and `10`.
    pub fn raw(&self) -> (i64, i64) {
        (
            parse_page_param(self.page.as_deref(), FIRST_PAGE),
            parse_page_param(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }
}

impl From<&QueryPairs> for PageParams {
    fn from(pairs: &QueryPairs) -> Self {
        Self {
            page: pairs.first("page").map(str::to_owned),
            page_size: pairs.first("page_size").map(str::to_owned),
        }
    }
}

/// Search parameters (`?q=`).
#[derive(Debug, Default)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl From<&QueryPairs> for SearchParams {
    fn from(pairs: &QueryPairs) -> Self {
        Self {
            q: pairs.first("q").map(str::to_owned),
        }
    }
}
