//! # helios-sorter-rest - HTTP Listings with Remembered Sorting
//!
//! This crate exposes [`helios_sorter`] over HTTP: every collection of a
//! [`SearchRepository`] can be listed page by page, and the sort a user picks
//! is remembered per listing URL in their session.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use helios_sorter::repository::InMemoryRepository;
//! use helios_sorter_rest::{create_app, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repository = InMemoryRepository::new();
//!     repository.create_collection("items");
//!
//!     let app = create_app(repository);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Interaction | HTTP Method | URL Pattern |
//! |------------|-------------|-------------|
//! | listing | GET | `/[collection]?sortBy=&sortOrder=&page=&perPage=` |
//! | listing (first page) | POST | `/[collection]?sortBy=&sortOrder=` |
//! | health | GET | `/health` |
//!
//! `clear_sort` in the query string forgets every remembered sort of the
//! session.
//!
//! ## Sessions
//!
//! The session id travels in the `sorter_session` cookie (configurable) or
//! the `X-Session-ID` header. Requests without either get a new id in a
//! `Set-Cookie` response header.
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<code>", "message": "..."}`:
//!
//! | HTTP Status | Code | Description |
//! |-------------|------|-------------|
//! | 400 | invalid | Invalid pagination parameters |
//! | 404 | not-found | Unknown collection or page out of range |
//! | 500 | exception | Session or backend failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (repository, sessions, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Axum extractors for session and request data
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use helios_sorter::repository::SearchRepository;
use helios_sorter::session::SessionStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<R>(repository: R) -> Router
where
    R: SearchRepository + Send + Sync + 'static,
{
    create_app_with_config(repository, ServerConfig::default())
}

/// Creates the Axum application with custom configuration and an in-memory
/// session store.
///
/// # Example
///
/// ```rust
/// use helios_sorter::repository::InMemoryRepository;
/// use helios_sorter_rest::{create_app_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     item_per_page: 50,
///     default_sort_by: Some("name".to_string()),
///     ..Default::default()
/// };
/// let app = create_app_with_config(InMemoryRepository::new(), config);
/// ```
pub fn create_app_with_config<R>(repository: R, config: ServerConfig) -> Router
where
    R: SearchRepository + Send + Sync + 'static,
{
    create_app_with_state(AppState::new(Arc::new(repository), config))
}

/// Creates the Axum application from prepared state.
///
/// Use this to plug in a custom [`SessionStore`] or to keep a handle on the
/// repository and sessions.
pub fn create_app_with_state<R, T>(state: AppState<R, T>) -> Router
where
    R: SearchRepository + Send + Sync + 'static,
    T: SessionStore + 'static,
{
    let config = state.config().clone();
    info!(
        item_per_page = config.item_per_page,
        default_sort = ?config.default_sort_by,
        "Creating listing API server"
    );

    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helios_sorter_rest={level},helios_sorter={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
