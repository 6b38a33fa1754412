//! Core types for the query sorter.
//!
//! - [`SortTerm`], [`SortDirection`], [`MissingPlacement`] - Resolved sort terms
//! - [`SortField`], [`DefaultSort`] - Inputs of sort resolution
//! - [`SearchQuery`] - Immutable query descriptor
//! - [`SessionData`], [`PageKey`] - Remembered sort state
//!
//! # Example
//!
//! ```
//! use helios_sorter::types::{SearchQuery, SortDirection, SortTerm};
//!
//! let query = SearchQuery::new("items")
//!     .with_fields(["_id"])
//!     .with_sort(vec![SortTerm::new("price", SortDirection::Descending)]);
//!
//! let body = query.to_es_body();
//! assert_eq!(body["sort"][0]["price"]["missing"], "_last");
//! ```

mod query;
mod session_data;
mod sort;

pub use query::SearchQuery;
pub use session_data::{PageKey, SessionData};
pub use sort::{DefaultSort, MissingPlacement, SortDirection, SortField, SortTerm};
