//! Remembered sort state, partitioned by page key.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a logical listing page: the request path.
///
/// Sort state is scoped per page key, so `/items` and `/articles` remember
/// independent choices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    /// Creates a page key from a request path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Stored form of the remembered sort choices of one session.
///
/// Serializes as `{ "<path>": { "sortBy": "...", "sortOrder": "..." } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionData(BTreeMap<PageKey, BTreeMap<String, String>>);

impl SessionData {
    /// Creates empty session data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remembered value of `field` for `page`.
    pub fn get(&self, page: &PageKey, field: &str) -> Option<&str> {
        self.0
            .get(page)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Remembers `value` for `(page, field)`.
    ///
    /// `None` forgets the field but keeps the page entry.
    pub fn set(&mut self, page: &PageKey, field: &str, value: Option<String>) {
        let fields = self.0.entry(page.clone()).or_default();
        match value {
            Some(value) => {
                fields.insert(field.to_string(), value);
            }
            None => {
                fields.remove(field);
            }
        }
    }

    /// Iterates over the page keys with remembered state.
    pub fn pages(&self) -> impl Iterator<Item = &PageKey> {
        self.0.keys()
    }

    /// Returns true if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
