//! Integration tests for the listing endpoints.
//!
//! Covers:
//! - Natural order and configured default sort
//! - Remembered sort across requests of one session
//! - Session identification by header and cookie
//! - clear_sort
//! - Page selection, page size, and out-of-range pages

mod common;

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use common::assertions::{assert_error_code, assert_status, ids};
use common::harness::{TestHarness, create_test_server};
use helios_sorter::resolver::SESSION_QUERY_SORTER;
use helios_sorter::session::{Session, SessionId, SessionStore};
use helios_sorter_rest::ServerConfig;
use serde_json::{Value, json};

const X_SESSION_ID: HeaderName = HeaderName::from_static("x-session-id");

fn harness() -> TestHarness {
    create_test_server(ServerConfig::for_testing())
}

async fn get_as(server: &TestServer, session: &'static str, path: &str) -> axum_test::TestResponse {
    server
        .get(path)
        .add_header(X_SESSION_ID, HeaderValue::from_static(session))
        .await
}

// ============================================================================
// Natural order and defaults
// ============================================================================

#[tokio::test]
async fn test_listing_natural_order() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items").await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["collection"], "items");
    assert_eq!(body["page"], 1);
    assert_eq!(body["perPage"], 2);
    assert_eq!(body["total"], 5);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["ids"], json!(["a", "b"]));
    assert_eq!(body["sort"], json!([]));
}

#[tokio::test]
async fn test_configured_default_sort() {
    let TestHarness { server, sessions } = create_test_server(ServerConfig {
        default_sort_by: Some("name".to_string()),
        ..ServerConfig::for_testing()
    });

    let response = get_as(&server, "alice", "/items").await;

    assert_eq!(ids(&response), vec!["e", "b"]);
    let body: Value = response.json();
    assert_eq!(
        body["sort"],
        json!([{ "field": "name", "order": "asc", "missing": "_last" }])
    );
    // The default is not remembered
    assert!(
        !sessions
            .session(&SessionId::new("alice"))
            .has(SESSION_QUERY_SORTER)
            .unwrap()
    );
}

// ============================================================================
// Remembered sort
// ============================================================================

#[tokio::test]
async fn test_sort_is_remembered_for_the_listing() {
    let TestHarness { server, sessions } = harness();

    let response = get_as(&server, "alice", "/items?sortBy=price&sortOrder=desc").await;
    assert_eq!(ids(&response), vec!["e", "a"]);

    let response = get_as(&server, "alice", "/items?page=2").await;
    assert_eq!(ids(&response), vec!["c", "b"]);

    let response = get_as(&server, "alice", "/items?page=3").await;
    assert_eq!(ids(&response), vec!["d"]);

    assert_eq!(
        sessions
            .session(&SessionId::new("alice"))
            .get(SESSION_QUERY_SORTER)
            .unwrap(),
        Some(json!({ "/items": { "sortBy": "price", "sortOrder": "desc" } }))
    );
}

#[tokio::test]
async fn test_remembered_sort_beats_default() {
    let TestHarness { server, .. } = create_test_server(ServerConfig {
        default_sort_by: Some("name".to_string()),
        ..ServerConfig::for_testing()
    });

    get_as(&server, "alice", "/items?sortBy=price&sortOrder=asc").await;
    let response = get_as(&server, "alice", "/items").await;

    assert_eq!(ids(&response), vec!["b", "c"]);
}

#[tokio::test]
async fn test_sort_order_is_case_insensitive() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items?sortBy=price&sortOrder=DESC").await;

    assert_eq!(ids(&response), vec!["e", "a"]);
}

#[tokio::test]
async fn test_sessions_do_not_share_sorts() {
    let TestHarness { server, .. } = harness();

    get_as(&server, "alice", "/items?sortBy=price&sortOrder=desc").await;
    let response = get_as(&server, "bob", "/items").await;

    assert_eq!(ids(&response), vec!["a", "b"]);
}

#[tokio::test]
async fn test_clear_sort_restores_natural_order() {
    let TestHarness { server, sessions } = harness();

    get_as(&server, "alice", "/items?sortBy=price&sortOrder=desc").await;
    let response = get_as(&server, "alice", "/items?clear_sort=1").await;

    assert_eq!(ids(&response), vec!["a", "b"]);
    assert!(sessions.is_empty());
}

// ============================================================================
// Session identification
// ============================================================================

#[tokio::test]
async fn test_new_session_cookie_is_issued_and_honoured() {
    let TestHarness { server, .. } = harness();

    let response = server.get("/items?sortBy=name&sortOrder=asc").await;
    assert_status(&response, 200);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("new sessions get a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("sorter_session="));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    let response = server
        .get("/items")
        .add_header(header::COOKIE, HeaderValue::from_str(&cookie).unwrap())
        .await;

    assert_eq!(ids(&response), vec!["e", "b"]);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_known_session_gets_no_cookie() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items").await;

    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_invalid_session_header_rejected() {
    let TestHarness { server, .. } = harness();

    let response = server
        .get("/items")
        .add_header(X_SESSION_ID, HeaderValue::from_static("not a valid id"))
        .await;

    assert_status(&response, 400);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_per_page_override_is_capped() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items?perPage=3").await;
    assert_eq!(ids(&response), vec!["a", "b", "c"]);

    let response = get_as(&server, "alice", "/items?perPage=500").await;
    let body: Value = response.json();
    assert_eq!(body["perPage"], 10);
    assert_eq!(body["pages"], 1);
}

#[tokio::test]
async fn test_invalid_per_page_rejected() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items?perPage=many").await;

    assert_status(&response, 400);
}

#[tokio::test]
async fn test_invalid_page_falls_back_to_first() {
    let TestHarness { server, .. } = harness();

    for path in ["/items?page=0", "/items?page=-3", "/items?page=abc"] {
        let response = get_as(&server, "alice", path).await;
        let body: Value = response.json();
        assert_eq!(body["page"], 1, "{}", path);
    }
}

#[tokio::test]
async fn test_page_out_of_range() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/items?page=9").await;

    assert_status(&response, 404);
    assert_error_code(&response, "not-found");
}

#[tokio::test]
async fn test_empty_collection_has_one_page() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/empty").await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["pages"], 1);
    assert_eq!(body["ids"], json!([]));
}

#[tokio::test]
async fn test_unknown_collection() {
    let TestHarness { server, .. } = harness();

    let response = get_as(&server, "alice", "/articles").await;

    assert_status(&response, 404);
    assert_error_code(&response, "not-found");
}

#[tokio::test]
async fn test_post_ignores_page_but_remembers_sort() {
    let TestHarness { server, .. } = harness();

    let response = server
        .post("/items?sortBy=price&sortOrder=desc&page=2")
        .add_header(X_SESSION_ID, HeaderValue::from_static("alice"))
        .await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(ids(&response), vec!["e", "a"]);

    let response = get_as(&server, "alice", "/items?page=2").await;
    assert_eq!(ids(&response), vec!["c", "b"]);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let TestHarness { server, .. } = harness();

    let response = server.get("/health").await;

    assert_status(&response, 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "helios-sorter");
}
