//! Pagination extractor
//!
//! Reads `page` and `pageSize` from the query string and checks them against
//! the configured bounds.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use church_common::PaginationConfig;
use church_core::PageRequest;
use church_service::dto::PageParams;

use crate::response::ApiError;
use crate::state::AppState;

/// Validated page window for list endpoints
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

impl Paging {
    /// Apply defaults and bounds; out-of-range values are rejected, not clamped
    pub fn resolve(params: PageParams, bounds: PaginationConfig) -> Result<Self, ApiError> {
        let page = params.page.unwrap_or(1);
        let page_size = params.page_size.unwrap_or(bounds.default_page_size);

        if page_size > bounds.max_page_size {
            return Err(ApiError::invalid_query(format!(
                "pageSize must be less than or equal to {}",
                bounds.max_page_size
            )));
        }

        Ok(Paging(PageRequest::new(page, page_size)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Paging::resolve(params, AppState::from_ref(state).pagination())
    }
}
