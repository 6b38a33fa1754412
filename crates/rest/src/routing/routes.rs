//! Listing route configuration.

use axum::{Router, routing::get};
use helios_sorter::repository::SearchRepository;
use helios_sorter::session::SessionStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all listing API routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness check
/// - `GET /{collection}` - Sorted listing
/// - `POST /{collection}` - Sorted listing, first page
pub fn create_routes<R, T>(state: AppState<R, T>) -> Router
where
    R: SearchRepository + Send + Sync + 'static,
    T: SessionStore + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/_liveness", get(handlers::liveness_handler))
        .route(
            "/{collection}",
            get(handlers::listing_get_handler::<R, T>)
                .post(handlers::listing_post_handler::<R, T>),
        )
        .with_state(state)
}
