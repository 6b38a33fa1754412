//! Listing handler.
//!
//! Serves a sorted page of document ids for a collection:
//! - `GET [base]/[collection]?sortBy=..&sortOrder=..&page=..&perPage=..`
//! - `POST [base]/[collection]?sortBy=..&sortOrder=..` (always page 1)
//!
//! The sort chosen through `sortBy` is remembered per listing path in the
//! caller's session.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use helios_sorter::repository::{Paginator, SearchRepository};
use helios_sorter::session::SessionStore;
use helios_sorter::{QuerySorter, RequestContext, SearchQuery, SortTerm};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{ListingRequest, PageSize, SessionExtractor};
use crate::state::AppState;

/// Body of a listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// The collection listed.
    pub collection: String,
    /// The 1-based page returned.
    pub page: usize,
    /// Maximum ids per page.
    pub per_page: usize,
    /// Total number of documents.
    pub total: usize,
    /// Number of pages.
    pub pages: usize,
    /// Ids on this page, in sort order.
    pub ids: Vec<String>,
    /// The sort applied; empty for natural order.
    pub sort: Vec<SortTerm>,
}

/// Handler for GET listings.
///
/// # HTTP Request
///
/// `GET [base]/[collection]?params`
///
/// # Response
///
/// - `200 OK` - A [`ListingResponse`]
/// - `400 Bad Request` - Invalid `perPage`
/// - `404 Not Found` - Unknown collection or page beyond the last one
pub async fn listing_get_handler<R, T>(
    State(state): State<AppState<R, T>>,
    Path(collection): Path<String>,
    session: SessionExtractor,
    page_size: PageSize,
    ListingRequest(request): ListingRequest,
) -> RestResult<Response>
where
    R: SearchRepository + Send + Sync,
    T: SessionStore,
{
    debug!(
        collection = %collection,
        session = %session.id(),
        query = ?request.query(),
        "Processing listing GET request"
    );

    execute_listing(&state, &collection, &session, page_size, request)
}

/// Handler for POST listings.
///
/// Same as GET, except that `page` is ignored and the first page is served.
///
/// # HTTP Request
///
/// `POST [base]/[collection]?params`
pub async fn listing_post_handler<R, T>(
    State(state): State<AppState<R, T>>,
    Path(collection): Path<String>,
    session: SessionExtractor,
    page_size: PageSize,
    ListingRequest(request): ListingRequest,
) -> RestResult<Response>
where
    R: SearchRepository + Send + Sync,
    T: SessionStore,
{
    debug!(
        collection = %collection,
        session = %session.id(),
        query = ?request.query(),
        "Processing listing POST request"
    );

    execute_listing(&state, &collection, &session, page_size, request)
}

fn execute_listing<R, T>(
    state: &AppState<R, T>,
    collection: &str,
    session: &SessionExtractor,
    page_size: PageSize,
    request: RequestContext,
) -> RestResult<Response>
where
    R: SearchRepository,
    T: SessionStore,
{
    let per_page = page_size.resolve(state.config());

    let mut sorter = QuerySorter::new(
        Some(request),
        state.session(session.id()),
        state.item_per_page(),
    )?;
    let paginator = sorter.sort(
        state.repository(),
        SearchQuery::new(collection),
        Some(per_page),
        state.default_sort(),
    )?;
    let hits = paginator.current_page_results()?;

    let body = ListingResponse {
        collection: collection.to_string(),
        page: paginator.current_page(),
        per_page: paginator.max_per_page(),
        total: paginator.nb_results(),
        pages: paginator.nb_pages(),
        ids: hit_ids(&hits),
        sort: sorter
            .last_query()
            .map(|query| query.sort.clone())
            .unwrap_or_default(),
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    if session.is_new()
        && let Some(cookie) = session.set_cookie(state.session_cookie())
    {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

fn hit_ids(hits: &[Value]) -> Vec<String> {
    hits.iter()
        .filter_map(|hit| hit.get("_id").and_then(Value::as_str))
        .map(String::from)
        .collect()
}
