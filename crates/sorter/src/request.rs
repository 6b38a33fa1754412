//! Request context consumed by the sorter.
//!
//! The sorter only needs three things from the current request: its method,
//! its path (the page key) and its query-string parameters.

use std::collections::HashMap;

use http::{Method, Uri};

use crate::types::PageKey;

/// Query-string parameters of a request.
///
/// Presence matters independently of the value: `?clear_sort` and
/// `?sortBy=` both count as present. When a name repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Creates empty query params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw, url-encoded query string (without the leading `?`).
    pub fn parse(raw: &str) -> Self {
        let params = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { params }
    }

    /// Returns true if the parameter is present, whatever its value.
    pub fn has(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// The parts of the current HTTP request the sorter reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: Method,
    page_key: PageKey,
    query: QueryParams,
}

impl RequestContext {
    /// Creates a request context.
    pub fn new(method: Method, path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            method,
            page_key: PageKey::new(path),
            query,
        }
    }

    /// Creates a request context from a method and request URI.
    pub fn from_uri(method: Method, uri: &Uri) -> Self {
        Self::new(
            method,
            uri.path(),
            QueryParams::parse(uri.query().unwrap_or_default()),
        )
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns true for GET requests.
    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        self.page_key.as_str()
    }

    /// Returns the page key (the request path).
    pub fn page_key(&self) -> &PageKey {
        &self.page_key
    }

    /// Returns the query-string parameters.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }
}
