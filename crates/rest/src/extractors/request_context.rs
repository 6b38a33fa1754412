//! Request context extractor.
//!
//! Captures the method, path and query string the sorter reads.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use helios_sorter::RequestContext;

/// Axum extractor wrapping a [`RequestContext`].
///
/// The page key is the full request path, so every listing URL remembers its
/// own sort.
#[derive(Debug, Clone)]
pub struct ListingRequest(pub RequestContext);

impl<S> FromRequestParts<S> for ListingRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ListingRequest(RequestContext::from_uri(
            parts.method.clone(),
            &parts.uri,
        )))
    }
}
