//! Search repository and paginator traits.
//!
//! These are the seams to the search engine. A repository executes a
//! [`SearchQuery`] and yields a [`Paginator`]; the sorter then sets the page
//! and page size on it. Bounds checking of the page number belongs to the
//! paginator.
//!
//! [`InMemoryRepository`] implements both for tests and the demo server.

mod memory;

use serde_json::Value;

use crate::error::SearchResult;
use crate::types::SearchQuery;

pub use memory::{InMemoryPaginator, InMemoryRepository};

/// A page-slicing view over the hits of an executed query.
pub trait Paginator {
    /// Sets the 1-based current page.
    fn set_current_page(&mut self, page: usize) -> SearchResult<()>;

    /// Sets the maximum number of hits per page.
    fn set_max_per_page(&mut self, max_per_page: usize) -> SearchResult<()>;

    /// Returns the 1-based current page.
    fn current_page(&self) -> usize;

    /// Returns the maximum number of hits per page.
    fn max_per_page(&self) -> usize;

    /// Returns the total number of hits.
    fn nb_results(&self) -> usize;

    /// Returns the number of pages; never less than 1.
    fn nb_pages(&self) -> usize;

    /// Returns the hits of the current page.
    fn current_page_results(&self) -> SearchResult<Vec<Value>>;

    /// Returns true if there is a page after the current one.
    fn has_next_page(&self) -> bool {
        self.current_page() < self.nb_pages()
    }

    /// Returns true if there is a page before the current one.
    fn has_previous_page(&self) -> bool {
        self.current_page() > 1
    }
}

/// Executes search queries.
pub trait SearchRepository {
    /// The paginator produced for a query.
    type Paginator: Paginator;

    /// Executes `query` and returns a paginator over its hits.
    fn find_paginated(&self, query: &SearchQuery) -> SearchResult<Self::Paginator>;
}
