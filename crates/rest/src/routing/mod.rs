//! Route configuration for the listing API.

pub mod routes;

pub use routes::create_routes;
