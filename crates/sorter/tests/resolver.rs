//! Integration tests for remembered sort resolution across requests.
//!
//! Each test simulates a sequence of requests from one browser session: a
//! fresh resolver per request, sharing a session store.

use helios_sorter::prelude::*;
use helios_sorter::resolver::SESSION_QUERY_SORTER;
use helios_sorter::session::MemorySession;
use helios_sorter::types::PageKey;
use http::Method;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn get(path: &str, query: &str) -> RequestContext {
    RequestContext::new(Method::GET, path, QueryParams::parse(query))
}

fn session(store: &MemorySessionStore, id: &str) -> MemorySession {
    store.session(&SessionId::new(id))
}

fn resolver_for(
    store: &MemorySessionStore,
    request: RequestContext,
) -> SortStateResolver<MemorySession> {
    SortStateResolver::new(Some(request), session(store, "browser"), 20)
        .expect("in-memory session never fails")
}

fn resolve(
    store: &MemorySessionStore,
    path: &str,
    query: &str,
    default_sort: Option<&DefaultSort>,
) -> Vec<SortTerm> {
    resolver_for(store, get(path, query))
        .resolve_sort(default_sort)
        .expect("in-memory session never fails")
}

fn asc(field: &str) -> SortTerm {
    SortTerm::new(field, SortDirection::Ascending)
}

fn desc(field: &str) -> SortTerm {
    SortTerm::new(field, SortDirection::Descending)
}

// ============================================================================
// Natural order and defaults
// ============================================================================

#[test]
fn test_no_sort_without_request_params_session_or_default() {
    let store = MemorySessionStore::new();
    let mut resolver = resolver_for(&store, get("/items", ""));

    let query = resolver
        .add_sort(SearchQuery::new("items"), None)
        .unwrap();

    assert!(!query.has_sort());
    assert!(store.is_empty());
}

#[test]
fn test_default_sort_applies_ascending_when_unspecified() {
    let store = MemorySessionStore::new();
    let terms = resolve(&store, "/items", "", Some(&DefaultSort::new("name")));

    assert_eq!(terms, vec![asc("name")]);
    // Defaults are not remembered
    assert!(store.is_empty());
}

// ============================================================================
// Fresh sort
// ============================================================================

#[test]
fn test_fresh_sort_is_applied_and_remembered() {
    let store = MemorySessionStore::new();
    let mut resolver = resolver_for(&store, get("/items", "sortBy=price&sortOrder=desc"));

    let query = resolver
        .add_sort(SearchQuery::new("items"), None)
        .unwrap();

    assert_eq!(query.sort, vec![desc("price")]);
    assert_eq!(
        serde_json::to_value(resolver.session_data()).unwrap(),
        json!({ "/items": { "sortBy": "price", "sortOrder": "desc" } })
    );
    assert_eq!(
        session(&store, "browser").get(SESSION_QUERY_SORTER).unwrap(),
        Some(json!({ "/items": { "sortBy": "price", "sortOrder": "desc" } }))
    );
}

#[test]
fn test_fresh_sort_overrides_remembered_sort() {
    let store = MemorySessionStore::new();
    resolve(&store, "/items", "sortBy=price&sortOrder=desc", None);

    let terms = resolve(&store, "/items", "sortBy=name&sortOrder=asc", None);

    assert_eq!(terms, vec![asc("name")]);
    assert_eq!(resolve(&store, "/items", "", None), vec![asc("name")]);
}

#[test]
fn test_multi_field_sort_shares_order() {
    let store = MemorySessionStore::new();
    let terms = resolve(&store, "/items", "sortBy=price-name&sortOrder=asc", None);

    assert_eq!(terms, vec![asc("price"), asc("name")]);
}

#[test]
fn test_fetch_data_is_idempotent() {
    let store = MemorySessionStore::new();
    let mut resolver = resolver_for(&store, get("/items", "sortBy=price&sortOrder=desc"));

    let first = resolver.fetch_data(SortField::SortOrder).unwrap();
    let second = resolver.fetch_data(SortField::SortOrder).unwrap();

    assert_eq!(first, Some("desc".to_string()));
    assert_eq!(first, second);
}

#[test]
fn test_fetch_data_without_sort_by_does_not_persist() {
    let store = MemorySessionStore::new();
    let mut resolver = resolver_for(&store, get("/items", "sortOrder=desc&page=2"));

    assert_eq!(resolver.fetch_data(SortField::SortBy).unwrap(), None);
    assert_eq!(resolver.fetch_data(SortField::SortBy).unwrap(), None);
    assert!(store.is_empty());
}

// ============================================================================
// Remembered sort
// ============================================================================

#[test]
fn test_remembered_sort_takes_precedence_over_default() {
    let store = MemorySessionStore::new();
    resolve(&store, "/items", "sortBy=price&sortOrder=desc", None);

    let terms = resolve(
        &store,
        "/items",
        "page=2",
        Some(&DefaultSort::new("name").with_order("asc")),
    );

    assert_eq!(terms, vec![desc("price")]);
}

#[test]
fn test_page_keys_are_independent() {
    let store = MemorySessionStore::new();
    resolve(&store, "/items", "sortBy=price&sortOrder=desc", None);
    resolve(&store, "/articles", "sortBy=title&sortOrder=asc", None);

    assert_eq!(resolve(&store, "/items", "", None), vec![desc("price")]);
    assert_eq!(resolve(&store, "/articles", "", None), vec![asc("title")]);
    assert!(resolve(&store, "/users", "", None).is_empty());

    let resolver = resolver_for(&store, get("/users", ""));
    let pages: Vec<&PageKey> = resolver.session_data().pages().collect();
    assert_eq!(pages.len(), 2);
}

#[test]
fn test_sessions_are_independent() {
    let store = MemorySessionStore::new();
    resolve(&store, "/items", "sortBy=price&sortOrder=desc", None);

    let mut other = SortStateResolver::new(Some(get("/items", "")), session(&store, "other"), 20)
        .unwrap();

    assert!(other.resolve_sort(None).unwrap().is_empty());
}

// ============================================================================
// Clearing
// ============================================================================

#[test]
fn test_clear_sort_forgets_every_page() {
    let store = MemorySessionStore::new();
    resolve(&store, "/items", "sortBy=price&sortOrder=desc", None);
    resolve(&store, "/articles", "sortBy=title&sortOrder=asc", None);

    let resolver = resolver_for(&store, get("/items", "clear_sort=1"));
    assert!(resolver.session_data().is_empty());
    assert_eq!(
        session(&store, "browser").get(SESSION_QUERY_SORTER).unwrap(),
        None
    );

    assert!(resolve(&store, "/articles", "", None).is_empty());
}

#[test]
fn test_clear_sort_happens_before_fresh_sort() {
    let store = MemorySessionStore::new();
    resolve(&store, "/articles", "sortBy=title&sortOrder=asc", None);

    let terms = resolve(&store, "/items", "clear_sort&sortBy=price&sortOrder=asc", None);

    assert_eq!(terms, vec![asc("price")]);
    assert!(resolve(&store, "/articles", "", None).is_empty());
    assert_eq!(resolve(&store, "/items", "", None), vec![asc("price")]);
}

// ============================================================================
// Page resolution
// ============================================================================

#[test]
fn test_page_resolution() {
    let store = MemorySessionStore::new();

    assert_eq!(resolver_for(&store, get("/items", "page=3")).current_page(), 3);
    assert_eq!(resolver_for(&store, get("/items", "page=abc")).current_page(), 1);
    assert_eq!(resolver_for(&store, get("/items", "")).current_page(), 1);

    let post = RequestContext::new(Method::POST, "/items", QueryParams::parse("page=5"));
    assert_eq!(resolver_for(&store, post).current_page(), 1);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_remembered_sort_drives_pagination() {
    let repository = InMemoryRepository::new();
    repository
        .insert_all(
            "items",
            vec![
                json!({ "_id": "lamp", "price": 25 }),
                json!({ "_id": "bed", "price": 300 }),
                json!({ "_id": "rug" }),
                json!({ "_id": "chair", "price": 40 }),
            ],
        )
        .unwrap();
    let store = MemorySessionStore::new();

    let mut first = QuerySorter::new(
        Some(get("/items", "sortBy=price&sortOrder=desc")),
        session(&store, "browser"),
        2,
    )
    .unwrap();
    let page = first
        .sort(&repository, SearchQuery::new("items"), None, None)
        .unwrap();
    assert_eq!(
        page.current_page_results().unwrap(),
        vec![json!({ "_id": "bed" }), json!({ "_id": "chair" })]
    );

    let mut second = QuerySorter::new(
        Some(get("/items", "page=2")),
        session(&store, "browser"),
        2,
    )
    .unwrap();
    let page = second
        .sort(&repository, SearchQuery::new("items"), None, None)
        .unwrap();
    assert_eq!(
        page.current_page_results().unwrap(),
        vec![json!({ "_id": "lamp" }), json!({ "_id": "rug" })]
    );
    assert!(!page.has_next_page());
}
