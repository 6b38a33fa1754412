//! Sort-and-paginate entry point.

use tracing::debug;

use crate::error::SorterResult;
use crate::repository::{Paginator, SearchRepository};
use crate::request::RequestContext;
use crate::resolver::SortStateResolver;
use crate::session::Session;
use crate::types::{DefaultSort, SearchQuery, SessionData, SortField};

/// Page size for listings that should fit on a single page.
pub const NO_LIMIT: usize = 99_999;

/// Field every hit is restricted to; callers hydrate documents themselves.
const ID_FIELD: &str = "_id";

/// Sorts and paginates search queries, remembering the user's sort choice
/// per page in their session.
///
/// # Example
///
/// ```
/// use helios_sorter::prelude::*;
/// use http::Method;
/// use serde_json::json;
///
/// let repository = InMemoryRepository::new();
/// repository
///     .insert_all(
///         "items",
///         vec![
///             json!({ "_id": "a", "price": 10 }),
///             json!({ "_id": "b", "price": 30 }),
///         ],
///     )
///     .unwrap();
///
/// let store = MemorySessionStore::new();
/// let request = RequestContext::new(
///     Method::GET,
///     "/items",
///     QueryParams::parse("sortBy=price&sortOrder=desc"),
/// );
///
/// let mut sorter =
///     QuerySorter::new(Some(request), store.session(&SessionId::new("s1")), 20).unwrap();
/// let paginator = sorter
///     .sort(&repository, SearchQuery::new("items"), None, None)
///     .unwrap();
///
/// let hits = paginator.current_page_results().unwrap();
/// assert_eq!(hits[0]["_id"], "b");
/// ```
#[derive(Debug)]
pub struct QuerySorter<S> {
    resolver: SortStateResolver<S>,
    last_query: Option<SearchQuery>,
}

impl<S: Session> QuerySorter<S> {
    /// Creates a sorter for the current request.
    ///
    /// `item_per_page` is the page size used when [`sort`](Self::sort) is not
    /// given one.
    ///
    /// # Errors
    ///
    /// Propagates session store failures.
    pub fn new(
        request: Option<RequestContext>,
        session: S,
        item_per_page: usize,
    ) -> SorterResult<Self> {
        Ok(Self {
            resolver: SortStateResolver::new(request, session, item_per_page)?,
            last_query: None,
        })
    }

    /// Sorts `query` and returns a paginator positioned on the requested page.
    ///
    /// Hits are restricted to their `_id`. `items_per_page` defaults to the
    /// configured page size; `default_sort` applies only when neither the
    /// request nor the session name a sort field.
    ///
    /// # Errors
    ///
    /// Propagates session store, repository and paginator failures.
    pub fn sort<R>(
        &mut self,
        repository: &R,
        query: SearchQuery,
        items_per_page: Option<usize>,
        default_sort: Option<&DefaultSort>,
    ) -> SorterResult<R::Paginator>
    where
        R: SearchRepository + ?Sized,
    {
        let items_per_page = items_per_page.unwrap_or_else(|| self.item_per_page());

        let query = query.with_fields([ID_FIELD]);
        let query = self.resolver.add_sort(query, default_sort)?;

        let mut paginator = repository.find_paginated(&query)?;
        let current_page = self.resolver.current_page();
        paginator.set_current_page(current_page)?;
        paginator.set_max_per_page(items_per_page)?;

        debug!(
            collection = %query.collection,
            current_page,
            items_per_page,
            sort_terms = query.sort.len(),
            "Sorted and paginated query"
        );

        self.last_query = Some(query);
        Ok(paginator)
    }

    /// Looks up a sort field for the current page; see
    /// [`SortStateResolver::fetch_data`].
    ///
    /// # Errors
    ///
    /// Propagates failures writing the session.
    pub fn fetch_data(&mut self, key: SortField) -> SorterResult<Option<String>> {
        Ok(self.resolver.fetch_data(key)?)
    }

    /// Returns the query executed by the last [`sort`](Self::sort) call.
    pub fn last_query(&self) -> Option<&SearchQuery> {
        self.last_query.as_ref()
    }

    /// Returns the underlying resolver.
    pub fn resolver(&self) -> &SortStateResolver<S> {
        &self.resolver
    }

    /// Returns the session handle; `None` when there is no request.
    pub fn session(&self) -> Option<&S> {
        self.resolver.session()
    }

    /// Returns the request.
    pub fn request(&self) -> Option<&RequestContext> {
        self.resolver.request()
    }

    /// Returns the in-memory snapshot of the remembered state.
    pub fn session_data(&self) -> &SessionData {
        self.resolver.session_data()
    }

    /// Returns the configured number of items per page.
    pub fn item_per_page(&self) -> usize {
        self.resolver.item_per_page()
    }
}
