//! Sort terms and the request fields they are resolved from.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Sort direction of a single sort term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Descending order.
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Parses a direction case-insensitively (`asc`, `ASC`, `Desc`, ...).
    ///
    /// Returns `None` for anything that is not a known direction.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// Returns the lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where documents without a value for the sorted field are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MissingPlacement {
    /// Missing values come first.
    #[serde(rename = "_first")]
    First,
    /// Missing values come last.
    #[default]
    #[serde(rename = "_last")]
    Last,
}

impl MissingPlacement {
    /// Returns the Elasticsearch wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingPlacement::First => "_first",
            MissingPlacement::Last => "_last",
        }
    }
}

/// A single `(field, direction, missing)` sort term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortTerm {
    /// The document field to sort on.
    pub field: String,
    /// The sort direction.
    #[serde(rename = "order")]
    pub direction: SortDirection,
    /// Placement of documents missing the field.
    pub missing: MissingPlacement,
}

impl SortTerm {
    /// Creates a term that sorts missing values last.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
            missing: MissingPlacement::Last,
        }
    }

    /// Renders the term as an Elasticsearch sort clause.
    pub fn to_es_clause(&self) -> Value {
        let mut clause = serde_json::Map::new();
        clause.insert(
            self.field.clone(),
            json!({
                "order": self.direction.as_str(),
                "missing": self.missing.as_str(),
            }),
        );
        Value::Object(clause)
    }
}

/// The remembered request fields that drive sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// `sortBy`: one or more `-`-separated field names.
    SortBy,
    /// `sortOrder`: `asc` or `desc`.
    SortOrder,
}

impl SortField {
    /// Returns the query parameter (and session field) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::SortBy => "sortBy",
            SortField::SortOrder => "sortOrder",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied fallback sort, used when neither the request nor the
/// session provide a sort field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    /// The single field to sort on.
    #[serde(rename = "sortBy")]
    pub sort_by: String,
    /// The order; `asc` when absent.
    #[serde(rename = "sortOrder", default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl DefaultSort {
    /// Creates a default sort on `sort_by` without an explicit order.
    pub fn new(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_order: None,
        }
    }

    /// Sets the order.
    pub fn with_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    /// Returns true if the default names a field.
    pub fn is_usable(&self) -> bool {
        !self.sort_by.is_empty()
    }
}
