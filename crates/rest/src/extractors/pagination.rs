//! Page size extractor.
//!
//! Extracts the `perPage` query parameter. The page number itself is read by
//! the sorter from the request context.

use axum::{
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
};
use serde::Deserialize;

use crate::config::ServerConfig;

/// Axum extractor for the requested page size.
///
/// # Example
///
/// ```rust,ignore
/// use helios_sorter_rest::extractors::PageSize;
///
/// async fn list_handler(page_size: PageSize) {
///     let per_page = page_size.resolve(&config);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSize {
    requested: Option<usize>,
}

/// Query parameters for the page size.
#[derive(Debug, Deserialize)]
struct PageSizeQuery {
    #[serde(rename = "perPage")]
    per_page: Option<usize>,
}

impl PageSize {
    /// Creates a PageSize for the given request value.
    pub fn new(requested: Option<usize>) -> Self {
        Self { requested }
    }

    /// Returns the page size the client asked for.
    pub fn requested(&self) -> Option<usize> {
        self.requested
    }

    /// Resolves the effective page size, capped at the configured maximum.
    pub fn resolve(&self, config: &ServerConfig) -> usize {
        config.page_size(self.requested)
    }
}

impl<S> FromRequestParts<S> for PageSize
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageSizeQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid perPage parameter"))?;

        Ok(PageSize::new(query.per_page))
    }
}
