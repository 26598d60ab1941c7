//! Page-size policy shared by every paginated listing.
//!
//! Callers supply `page >= 1` and `records_per_page >= 1`; the HTTP layer
//! enforces that contract. This module only applies the upper bound.

/// Page used when the caller does not specify one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not specify one.
pub const DEFAULT_RECORDS_PER_PAGE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_RECORDS_PER_PAGE: i64 = 50;

/// Response header carrying the unpaginated match count.
pub const TOTAL_COUNT_HEADER: &str = "totalAmountOfRecord";

/// A requested page with its size already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    records_per_page: i64,
}

impl Pagination {
    /// Build a page request, clamping `records_per_page` to
    /// [`MAX_RECORDS_PER_PAGE`]. No lower bound is applied.
    pub fn new(page: i64, records_per_page: i64) -> Self {
        Self {
            page,
            records_per_page: records_per_page.min(MAX_RECORDS_PER_PAGE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn records_per_page(&self) -> i64 {
        self.records_per_page
    }

    /// Rows to skip before the page starts, saturating at `i64::MAX` for
    /// pages far past the end.
    pub fn skip(&self) -> i64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.records_per_page)
    }

    /// Rows in one page.
    pub fn take(&self) -> i64 {
        self.records_per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_RECORDS_PER_PAGE)
    }
}
