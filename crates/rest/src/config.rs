//! Server configuration for the listing API.
//!
//! Configuration comes from command line arguments, environment variables,
//! or code.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SORTER_SERVER_PORT` | 8080 | Server port |
//! | `SORTER_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `SORTER_LOG_LEVEL` | info | Log level |
//! | `SORTER_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `SORTER_ENABLE_CORS` | true | Enable CORS |
//! | `SORTER_CORS_ORIGINS` | * | Allowed origins |
//! | `SORTER_ITEM_PER_PAGE` | 20 | Default page size |
//! | `SORTER_MAX_ITEM_PER_PAGE` | 1000 | Maximum page size for `perPage` |
//! | `SORTER_SESSION_COOKIE` | sorter_session | Session cookie name |
//! | `SORTER_DEFAULT_SORT_BY` | | Default sort field(s) |
//! | `SORTER_DEFAULT_SORT_ORDER` | | Default sort order |
//! | `SORTER_DATA_FILE` | | JSON file of documents to index at startup |
//!
//! # Example
//!
//! ```rust
//! use helios_sorter_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     default_sort_by: Some("name".to_string()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use clap::Parser;
use helios_sorter::{DefaultSort, SortDirection};

/// Server configuration for the listing API.
#[derive(Debug, Clone, Parser)]
#[command(name = "sorter-server")]
#[command(about = "Sorted, paginated listings with remembered sort order")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "SORTER_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "SORTER_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SORTER_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SORTER_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "SORTER_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "SORTER_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Items per page when the request does not ask for a page size.
    #[arg(long, env = "SORTER_ITEM_PER_PAGE", default_value = "20")]
    pub item_per_page: usize,

    /// Upper bound for the `perPage` query parameter.
    #[arg(long, env = "SORTER_MAX_ITEM_PER_PAGE", default_value = "1000")]
    pub max_item_per_page: usize,

    /// Name of the cookie carrying the session id.
    #[arg(long, env = "SORTER_SESSION_COOKIE", default_value = "sorter_session")]
    pub session_cookie: String,

    /// Sort field(s) used when neither the request nor the session name one.
    #[arg(long, env = "SORTER_DEFAULT_SORT_BY")]
    pub default_sort_by: Option<String>,

    /// Sort order paired with the default sort field.
    #[arg(long, env = "SORTER_DEFAULT_SORT_ORDER")]
    pub default_sort_order: Option<String>,

    /// JSON file mapping collection names to document arrays.
    #[arg(long, env = "SORTER_DATA_FILE")]
    pub data_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            item_per_page: 20,
            max_item_per_page: 1000,
            session_cookie: "sorter_session".to_string(),
            default_sort_by: None,
            default_sort_order: None,
            data_file: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Falls back to defaults when the environment cannot be parsed.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured default sort, if any.
    pub fn default_sort(&self) -> Option<DefaultSort> {
        let sort_by = self.default_sort_by.as_deref()?;
        let default = DefaultSort::new(sort_by);
        let default = match self.default_sort_order.as_deref() {
            Some(order) => default.with_order(order),
            None => default,
        };
        default.is_usable().then_some(default)
    }

    /// Resolves the page size for a request asking for `requested` items.
    ///
    /// Zero falls back to the configured page size; anything above the
    /// maximum is capped.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.item_per_page,
            Some(size) => size.min(self.max_item_per_page),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.item_per_page == 0 {
            errors.push("Items per page cannot be 0".to_string());
        }

        if self.item_per_page > self.max_item_per_page {
            errors.push("Items per page cannot exceed max items per page".to_string());
        }

        if self.session_cookie.is_empty()
            || !self
                .session_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            errors.push(format!(
                "Invalid session cookie name '{}'",
                self.session_cookie
            ));
        }

        if let Some(order) = &self.default_sort_order
            && SortDirection::parse(order).is_none()
        {
            errors.push(format!(
                "Invalid default sort order '{}', expected asc or desc",
                order
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0 and a small page size.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            item_per_page: 2,
            max_item_per_page: 10,
            session_cookie: "sorter_session".to_string(),
            default_sort_by: None,
            default_sort_order: None,
            data_file: None,
        }
    }
}
