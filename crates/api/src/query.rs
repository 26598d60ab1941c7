//! Shared query parameter types for API handlers.
//!
//! Query strings use camelCase names (`recordsPerPage`, `genreId`, ...) to
//! match the response header `totalAmountOfRecord`.

use reel_core::error::CoreError;
use reel_core::movie_filter::MovieFilter;
use reel_core::pagination::{Pagination, DEFAULT_PAGE, DEFAULT_RECORDS_PER_PAGE};
use reel_core::types::DbId;
use serde::Deserialize;

/// Page request (`?page=&recordsPerPage=`).
///
/// Both default when absent and must be at least 1. Page sizes above the
/// maximum are clamped by [`Pagination`], not rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub records_per_page: Option<i64>,
}

impl PaginationParams {
    pub fn to_pagination(&self) -> Result<Pagination, CoreError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let records_per_page = self.records_per_page.unwrap_or(DEFAULT_RECORDS_PER_PAGE);
        if page < 1 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        if records_per_page < 1 {
            return Err(CoreError::Validation(
                "recordsPerPage must be at least 1".into(),
            ));
        }
        Ok(Pagination::new(page, records_per_page))
    }
}

/// Query parameters for `GET /movies/filter`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilterParams {
    pub page: Option<i64>,
    pub records_per_page: Option<i64>,
    pub title: Option<String>,
    pub genre_id: Option<DbId>,
    /// Absent means no filter; `false` keeps only movies out of theaters.
    pub in_theaters: Option<bool>,
    #[serde(default)]
    pub future_releases: bool,
    pub order_by_field: Option<String>,
    pub order_by_ascending: Option<bool>,
}

impl MovieFilterParams {
    pub fn to_filter(&self) -> Result<MovieFilter, CoreError> {
        let pagination = PaginationParams {
            page: self.page,
            records_per_page: self.records_per_page,
        }
        .to_pagination()?;

        Ok(MovieFilter {
            pagination,
            title: self.title.clone(),
            genre_id: self.genre_id,
            in_theaters: self.in_theaters,
            future_releases: self.future_releases,
            order_by_field: self.order_by_field.clone(),
            order_by_ascending: self.order_by_ascending.unwrap_or(true),
        })
    }
}
