//! HTTP request handlers.
//!
//! - [`listing`] - Sorted, paginated listing of a collection
//! - [`health`] - Health check endpoints

pub mod health;
pub mod listing;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler};
pub use listing::{ListingResponse, listing_get_handler, listing_post_handler};
