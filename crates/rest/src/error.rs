//! Error types for the listing API.
//!
//! # Error Mapping
//!
//! Errors from the sorter are mapped to HTTP status codes and a JSON body of
//! the form `{"error": "<code>", "message": "..."}`:
//!
//! | Sorter Error | HTTP Status | Code |
//! |--------------|-------------|------|
//! | UnknownCollection | 404 | not-found |
//! | PageOutOfRange | 404 | not-found |
//! | InvalidPagination | 400 | invalid |
//! | InvalidDocument | 400 | invalid |
//! | Backend | 500 | exception |
//! | Session | 500 | exception |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use helios_sorter::{SearchError, SorterError};
use std::fmt;

/// The primary error type for listing API operations.
#[derive(Debug)]
pub enum RestError {
    /// Collection or page not found (HTTP 404).
    NotFound {
        /// What was not found.
        message: String,
    },

    /// Bad request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound { message } => write!(f, "Not found: {}", message),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for RestError {}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "not-found",
            RestError::BadRequest { .. } => "invalid",
            RestError::InternalError { .. } => "exception",
        }
    }

    fn message(&self) -> &str {
        match self {
            RestError::NotFound { message }
            | RestError::BadRequest { message }
            | RestError::InternalError { message } => message,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = create_error_body(self.code(), self.message());
        (self.status(), Json(body)).into_response()
    }
}

/// Creates the JSON body of an error response.
fn create_error_body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": code,
        "message": message,
    })
}

impl From<SorterError> for RestError {
    fn from(err: SorterError) -> Self {
        match err {
            SorterError::Search(e) => e.into(),
            SorterError::Session(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for RestError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::UnknownCollection { .. } | SearchError::PageOutOfRange { .. } => {
                RestError::NotFound {
                    message: err.to_string(),
                }
            }
            SearchError::InvalidPagination { .. } | SearchError::InvalidDocument { .. } => {
                RestError::BadRequest {
                    message: err.to_string(),
                }
            }
            SearchError::Backend { .. } => RestError::InternalError {
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
