//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {}, got {}",
        expected, actual
    );
}

/// Asserts that the response is a JSON error with the given code.
pub fn assert_error_code(response: &TestResponse, expected: &str) {
    let body: Value = response.json();
    assert_eq!(
        body["error"], expected,
        "Expected error code {}, got {}",
        expected, body
    );
    assert!(body["message"].is_string(), "Expected an error message");
}

/// Returns the ids of a listing response.
pub fn ids(response: &TestResponse) -> Vec<String> {
    let body: Value = response.json();
    body["ids"]
        .as_array()
        .expect("listing response has ids")
        .iter()
        .map(|id| id.as_str().expect("ids are strings").to_string())
        .collect()
}
