//! # helios-sorter - Remembered Sorting for Search Listings
//!
//! This crate sorts and paginates search engine queries for listing pages of
//! a web application, remembering each user's sort choice per page in their
//! session.
//!
//! ## How a sort is chosen
//!
//! For every request the [`SortStateResolver`](resolver::SortStateResolver)
//! merges three sources, most authoritative first:
//!
//! 1. `sortBy` / `sortOrder` in the query string. A `sortBy` marks a *fresh
//!    sort*, which is remembered for the request path.
//! 2. The sort remembered for the request path in the session.
//! 3. A [`DefaultSort`] supplied by the caller.
//!
//! `sortBy` may hold several `-`-separated fields (`price-name`) sharing one
//! order. Orders are case-insensitive. `clear_sort` forgets every remembered
//! sort of the session, and `page` selects the page on GET requests.
//!
//! ## Session layout
//!
//! Remembered state is stored under the `query_sorter` session key:
//!
//! ```json
//! { "/items": { "sortBy": "price", "sortOrder": "desc" } }
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use helios_sorter::prelude::*;
//! use http::{Method, Uri};
//!
//! let repository = InMemoryRepository::new();
//! repository.create_collection("items");
//!
//! let sessions = MemorySessionStore::new();
//! let uri: Uri = "/items?sortBy=price&sortOrder=asc&page=1".parse().unwrap();
//! let request = RequestContext::from_uri(Method::GET, &uri);
//!
//! let mut sorter = QuerySorter::new(
//!     Some(request),
//!     sessions.session(&SessionId::new("user-1")),
//!     20,
//! )
//! .unwrap();
//!
//! let paginator = sorter
//!     .sort(&repository, SearchQuery::new("items"), None, None)
//!     .unwrap();
//! assert_eq!(paginator.nb_results(), 0);
//! ```
//!
//! ## Architecture
//!
//! - [`error`] - Error types
//! - [`types`] - Sort terms, query descriptor, remembered state
//! - [`request`] - Request context (method, path, query string)
//! - [`session`] - Session store traits and in-memory store
//! - [`repository`] - Search repository and paginator traits, in-memory index
//! - [`resolver`] - Sort state resolution
//! - [`sorter`] - Sort-and-paginate entry point

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod repository;
pub mod request;
pub mod resolver;
pub mod session;
pub mod sorter;
pub mod types;

// Re-export commonly used types
pub use error::{SearchError, SessionError, SorterError, SorterResult};
pub use request::{QueryParams, RequestContext};
pub use resolver::SortStateResolver;
pub use sorter::{NO_LIMIT, QuerySorter};
pub use types::{DefaultSort, SearchQuery, SortDirection, SortTerm};

/// Commonly used traits and types.
pub mod prelude {
    pub use crate::repository::{InMemoryRepository, Paginator, SearchRepository};
    pub use crate::request::{QueryParams, RequestContext};
    pub use crate::resolver::SortStateResolver;
    pub use crate::session::{MemorySessionStore, Session, SessionId, SessionStore};
    pub use crate::sorter::{NO_LIMIT, QuerySorter};
    pub use crate::types::{DefaultSort, SearchQuery, SortDirection, SortField, SortTerm};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
