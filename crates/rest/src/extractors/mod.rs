//! Axum extractors for listing requests.
//!
//! - [`ListingRequest`] - Method, path and query string for the sorter
//! - [`SessionExtractor`] - Session id from cookie or header
//! - [`PageSize`] - The `perPage` parameter

mod pagination;
mod request_context;
mod session;

pub use pagination::PageSize;
pub use request_context::ListingRequest;
pub use session::{SessionExtractor, X_SESSION_ID};
