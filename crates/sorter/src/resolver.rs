//! Sort state resolution.
//!
//! The [`SortStateResolver`] decides which sort applies to a listing page,
//! merging three sources in order of authority:
//!
//! 1. An explicit `sortBy` in the current request. This is a *fresh sort*:
//!    the request's `sortBy`/`sortOrder` are used and remembered for the page.
//! 2. The choice remembered in the session for the page (the request path).
//! 3. A caller-supplied [`DefaultSort`].
//!
//! Without any of them no sort is applied and the search engine's natural
//! order stands.
//!
//! Remembered state lives in the session under [`SESSION_QUERY_SORTER`]. It is
//! loaded once when the resolver is built and written through on every
//! change. A `clear_sort` query parameter wipes it for every page before
//! anything else happens.

use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};
use crate::request::RequestContext;
use crate::session::Session;
use crate::types::{
    DefaultSort, PageKey, SearchQuery, SessionData, SortDirection, SortField, SortTerm,
};

/// Session key holding the remembered sort state.
pub const SESSION_QUERY_SORTER: &str = "query_sorter";

/// Query parameter that forgets all remembered sorts of the session.
pub const CLEAR_SORT: &str = "clear_sort";

/// Query parameter carrying the 1-based page number.
pub const PAGE: &str = "page";

/// Order used with a [`DefaultSort`] that names none.
const DEFAULT_ORDER: &str = "asc";

/// Merges request parameters, remembered session state and defaults into a
/// sort for the current request.
///
/// One resolver is built per request. Without a request the resolver is
/// inert: every lookup yields `None` and the session is never touched.
#[derive(Debug)]
pub struct SortStateResolver<S> {
    request: Option<RequestContext>,
    session: Option<S>,
    session_data: SessionData,
    item_per_page: usize,
}

impl<S: Session> SortStateResolver<S> {
    /// Builds the resolver for `request`, loading remembered state from
    /// `session`.
    ///
    /// # Errors
    ///
    /// Propagates session store failures.
    pub fn new(
        request: Option<RequestContext>,
        session: S,
        item_per_page: usize,
    ) -> SessionResult<Self> {
        let Some(request) = request else {
            debug!("No active request, sort state resolution disabled");
            return Ok(Self {
                request: None,
                session: None,
                session_data: SessionData::new(),
                item_per_page,
            });
        };

        if request.query().has(CLEAR_SORT) {
            debug!(page = %request.page_key(), "Clearing remembered sort state");
            session.remove(SESSION_QUERY_SORTER)?;
        }

        let session_data = load_session_data(&session)?;

        Ok(Self {
            request: Some(request),
            session: Some(session),
            session_data,
            item_per_page,
        })
    }

    /// Looks up `key` for the current page.
    ///
    /// A `sortBy` in the request makes this a fresh sort, whichever key is
    /// asked for: the request's value for `key` is returned and remembered
    /// (an absent value forgets the field). Otherwise the remembered value is
    /// returned unless the request itself carries `key`, in which case the
    /// result is `None`.
    ///
    /// # Errors
    ///
    /// Propagates failures writing the session.
    pub fn fetch_data(&mut self, key: SortField) -> SessionResult<Option<String>> {
        let Some(request) = &self.request else {
            return Ok(None);
        };
        let page_key = request.page_key();
        let query = request.query();

        if query.has(SortField::SortBy.as_str()) {
            let value = query.get(key.as_str()).map(str::to_owned);
            debug!(
                page = %page_key,
                key = %key,
                value = ?value,
                "Remembering fresh sort parameter"
            );
            self.session_data.set(page_key, key.as_str(), value.clone());
            self.store_session_data()?;
            return Ok(value);
        }

        if query.has(key.as_str()) {
            return Ok(None);
        }

        Ok(self
            .session_data
            .get(page_key, key.as_str())
            .map(str::to_owned))
    }

    /// Resolves the sort terms for the current request.
    ///
    /// `sortBy` may name several fields separated by `-`; all of them share
    /// the single resolved order; a repeated field counts once. Terms are only
    /// produced when an order is known.
    ///
    /// # Errors
    ///
    /// Propagates failures writing the session.
    pub fn resolve_sort(
        &mut self,
        default_sort: Option<&DefaultSort>,
    ) -> SessionResult<Vec<SortTerm>> {
        let sort_by = self.fetch_data(SortField::SortBy)?;
        let mut sort_order = self.fetch_data(SortField::SortOrder)?;

        let mut fields: Vec<String> = sort_by
            .as_deref()
            .unwrap_or_default()
            .split('-')
            .map(str::to_owned)
            .collect();

        let has_field = fields.first().is_some_and(|field| !field.is_empty());
        if !has_field && let Some(default) = default_sort.filter(|d| d.is_usable()) {
            fields = vec![default.sort_by.clone()];
            sort_order = Some(
                default
                    .sort_order
                    .clone()
                    .filter(|order| !order.is_empty())
                    .unwrap_or_else(|| DEFAULT_ORDER.to_string()),
            );
        }

        let Some(direction) = sort_order
            .as_deref()
            .filter(|order| !order.is_empty())
            .and_then(parse_direction)
        else {
            return Ok(Vec::new());
        };

        let mut terms: Vec<SortTerm> = Vec::with_capacity(fields.len());
        for field in fields {
            // a repeated field keeps its first position
            if field.is_empty() || terms.iter().any(|term| term.field == field) {
                continue;
            }
            terms.push(SortTerm::new(field, direction));
        }
        Ok(terms)
    }

    /// Returns `query` with the resolved sort attached.
    ///
    /// When nothing resolves, the query comes back unchanged and keeps its
    /// natural order.
    ///
    /// # Errors
    ///
    /// Propagates failures writing the session.
    pub fn add_sort(
        &mut self,
        query: SearchQuery,
        default_sort: Option<&DefaultSort>,
    ) -> SessionResult<SearchQuery> {
        let terms = self.resolve_sort(default_sort)?;
        if terms.is_empty() {
            return Ok(query);
        }
        Ok(query.with_sort(terms))
    }

    /// Returns the 1-based page requested by a GET request's `page`
    /// parameter.
    ///
    /// Absent, non-numeric and zero values give page 1, as does any
    /// non-GET request. The value is not checked against the number of pages.
    pub fn current_page(&self) -> usize {
        self.request
            .as_ref()
            .filter(|request| request.is_get())
            .and_then(|request| request.query().get(PAGE))
            .and_then(|page| page.trim().parse::<usize>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    /// Writes the remembered state back to the session.
    ///
    /// # Errors
    ///
    /// Propagates session store failures.
    pub fn store_session_data(&self) -> SessionResult<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };

        let value =
            serde_json::to_value(&self.session_data).map_err(|source| {
                SessionError::Serialization {
                    key: SESSION_QUERY_SORTER.to_string(),
                    source,
                }
            })?;
        session.set(SESSION_QUERY_SORTER, value)
    }

    /// Returns the session handle; `None` when there is no request.
    pub fn session(&self) -> Option<&S> {
        self.session.as_ref()
    }

    /// Returns the request.
    pub fn request(&self) -> Option<&RequestContext> {
        self.request.as_ref()
    }

    /// Returns the in-memory snapshot of the remembered state.
    pub fn session_data(&self) -> &SessionData {
        &self.session_data
    }

    /// Returns the page key of the current request.
    pub fn page_key(&self) -> Option<&PageKey> {
        self.request.as_ref().map(RequestContext::page_key)
    }

    /// Returns the configured number of items per page.
    pub fn item_per_page(&self) -> usize {
        self.item_per_page
    }
}

fn parse_direction(order: &str) -> Option<SortDirection> {
    let direction = SortDirection::parse(order);
    if direction.is_none() {
        debug!(order = %order, "Ignoring unknown sort order");
    }
    direction
}

fn load_session_data<S: Session>(session: &S) -> SessionResult<SessionData> {
    if !session.has(SESSION_QUERY_SORTER)? {
        return Ok(SessionData::new());
    }
    let Some(value) = session.get(SESSION_QUERY_SORTER)? else {
        return Ok(SessionData::new());
    };

    match serde_json::from_value::<SessionData>(value) {
        Ok(data) => Ok(data),
        Err(error) => {
            warn!(error = %error, "Discarding unreadable sort state from session");
            Ok(SessionData::new())
        }
    }
}
