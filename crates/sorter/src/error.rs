//! Error types for the query sorter.
//!
//! The sorter itself never produces user-facing errors: missing requests,
//! malformed page numbers and empty sort parameters all degrade silently.
//! What remains are failures of the external collaborators (the session
//! store and the search repository), which are propagated unchanged.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for sorter operations.
#[derive(Error, Debug)]
pub enum SorterError {
    /// Session store errors
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Search repository and paginator errors
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Errors raised by a session store.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backing store could not be reached.
    #[error("session store unavailable: {message}")]
    Unavailable { message: String },

    /// A value could not be converted to or from its stored form.
    #[error("failed to serialize session value '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a search repository or its paginator.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The queried collection (index) does not exist.
    #[error("unknown collection: {collection}")]
    UnknownCollection { collection: String },

    /// A document could not be indexed.
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    /// The requested page lies beyond the last page.
    #[error("page {page} is out of range, last page is {nb_pages}")]
    PageOutOfRange { page: usize, nb_pages: usize },

    /// A page number or page size was rejected by the paginator.
    #[error("invalid pagination: {message}")]
    InvalidPagination { message: String },

    /// The search backend failed.
    #[error("search backend error: {message}")]
    Backend { message: String },
}

/// Result type for sorter operations.
pub type SorterResult<T> = Result<T, SorterError>;

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for search repository operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_is_transparent() {
        let err: SorterError = SessionError::Unavailable {
            message: "redis down".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "session store unavailable: redis down");
    }

    #[test]
    fn test_page_out_of_range_display() {
        let err = SearchError::PageOutOfRange {
            page: 7,
            nb_pages: 3,
        };
        assert_eq!(err.to_string(), "page 7 is out of range, last page is 3");
    }
}
