//! Search query descriptor.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::sort::SortTerm;

/// An immutable description of a search against one collection (index).
///
/// Builder methods consume the query and return a new one, so attaching a
/// sort never mutates a query the caller still holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The collection (index) to search.
    pub collection: String,

    /// Fields to return for each hit. `None` returns whole documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Sort terms, applied in order. Empty means natural order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortTerm>,
}

impl SearchQuery {
    /// Creates a query over a whole collection in natural order.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Default::default()
        }
    }

    /// Restricts the returned fields.
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the sort terms.
    pub fn with_sort(mut self, sort: Vec<SortTerm>) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if a sort has been attached.
    pub fn has_sort(&self) -> bool {
        !self.sort.is_empty()
    }

    /// Renders the Elasticsearch request body for this query.
    pub fn to_es_body(&self) -> Value {
        let mut body = json!({
            "query": { "match_all": {} },
        });

        if let Some(fields) = &self.fields {
            body["stored_fields"] = json!(fields);
        }

        if self.has_sort() {
            body["sort"] = Value::Array(self.sort.iter().map(SortTerm::to_es_clause).collect());
        }

        body
    }
}
