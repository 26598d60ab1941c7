//! Shared response types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Paginated listings additionally report their total match count in a
//! response header through [`MetadataHeaders`].

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use reel_core::catalog::MetadataSink;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Response headers collected while a listing runs.
#[derive(Debug, Default)]
pub struct MetadataHeaders(pub HeaderMap);

impl MetadataHeaders {
    pub fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl MetadataSink for MetadataHeaders {
    fn set_header(&mut self, key: &str, value: String) {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                self.0.insert(name, value);
            }
            _ => tracing::warn!(key, "Dropping response header that is not valid HTTP"),
        }
    }
}
