//! Page-number pagination for book listings.
//!
//! Pages are 1-based. Out-of-range input is floored rather than rejected:
//! any page below 1 becomes [`FIRST_PAGE`] and any page size below 1 becomes
//! [`DEFAULT_PAGE_SIZE`].

/// The first page.
pub const FIRST_PAGE: i64 = 1;

/// Page size used when the caller asks for a non-positive size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A normalized page request. Construct through [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Normalize raw caller input.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page < FIRST_PAGE { FIRST_PAGE } else { page },
            page_size: if page_size < 1 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Row limit for the page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip, `(page - 1) * page_size`, saturating on overflow.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(FIRST_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Parse a raw query-string value leniently.
///
/// Absent values fall back to `default`; values that are not integers
/// become `0` and are later floored by [`PageRequest::new`].
pub fn parse_page_param(raw: Option<&str>, default: i64) -> i64 {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or(0),
    }
}
