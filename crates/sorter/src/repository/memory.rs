//! In-memory search repository.

use std::cmp::Ordering;
use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SearchError, SearchResult};
use crate::types::{MissingPlacement, SearchQuery, SortDirection, SortTerm};

use super::{Paginator, SearchRepository};

/// Page size used until the sorter sets one.
const DEFAULT_MAX_PER_PAGE: usize = 10;

/// Collections of JSON documents searchable like an index.
///
/// Every document carries a string `_id`. Queries match every document of
/// the collection; sort terms and field restrictions are honoured.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryRepository {
    /// Creates a repository without collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection. Existing collections are left intact.
    pub fn create_collection(&self, collection: &str) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default();
    }

    /// Indexes a document, replacing any document with the same `_id`.
    pub fn insert(&self, collection: &str, document: Value) -> SearchResult<()> {
        let id = document_id(&document)?.to_string();

        let mut collections = self.collections.write();
        let documents = collections.entry(collection.to_string()).or_default();
        match documents
            .iter_mut()
            .find(|existing| document_id(existing).is_ok_and(|existing_id| existing_id == id))
        {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
        Ok(())
    }

    /// Indexes several documents.
    pub fn insert_all<I>(&self, collection: &str, documents: I) -> SearchResult<()>
    where
        I: IntoIterator<Item = Value>,
    {
        self.create_collection(collection);
        for document in documents {
            self.insert(collection, document)?;
        }
        Ok(())
    }

    /// Returns the collection names.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<_> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of documents in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl SearchRepository for InMemoryRepository {
    type Paginator = InMemoryPaginator;

    fn find_paginated(&self, query: &SearchQuery) -> SearchResult<InMemoryPaginator> {
        let collections = self.collections.read();
        let documents =
            collections
                .get(&query.collection)
                .ok_or_else(|| SearchError::UnknownCollection {
                    collection: query.collection.clone(),
                })?;

        let mut hits: Vec<&Value> = documents.iter().collect();
        if query.has_sort() {
            // stable: ties keep insertion order
            hits.sort_by(|a, b| compare_hits(a, b, &query.sort));
        }

        let hits: Vec<Value> = hits
            .into_iter()
            .map(|document| project(document, query.fields.as_deref()))
            .collect();

        debug!(
            collection = %query.collection,
            hits = hits.len(),
            sort_terms = query.sort.len(),
            "Executed in-memory search"
        );

        Ok(InMemoryPaginator::new(hits))
    }
}

/// Paginator over a fully materialized hit list.
#[derive(Debug, Clone)]
pub struct InMemoryPaginator {
    hits: Vec<Value>,
    current_page: usize,
    max_per_page: usize,
}

impl InMemoryPaginator {
    /// Creates a paginator positioned on page 1.
    pub fn new(hits: Vec<Value>) -> Self {
        Self {
            hits,
            current_page: 1,
            max_per_page: DEFAULT_MAX_PER_PAGE,
        }
    }
}

impl Paginator for InMemoryPaginator {
    fn set_current_page(&mut self, page: usize) -> SearchResult<()> {
        if page == 0 {
            return Err(SearchError::InvalidPagination {
                message: "current page must be at least 1".to_string(),
            });
        }
        self.current_page = page;
        Ok(())
    }

    fn set_max_per_page(&mut self, max_per_page: usize) -> SearchResult<()> {
        if max_per_page == 0 {
            return Err(SearchError::InvalidPagination {
                message: "max per page must be at least 1".to_string(),
            });
        }
        self.max_per_page = max_per_page;
        Ok(())
    }

    fn current_page(&self) -> usize {
        self.current_page
    }

    fn max_per_page(&self) -> usize {
        self.max_per_page
    }

    fn nb_results(&self) -> usize {
        self.hits.len()
    }

    fn nb_pages(&self) -> usize {
        self.hits.len().div_ceil(self.max_per_page).max(1)
    }

    fn current_page_results(&self) -> SearchResult<Vec<Value>> {
        let nb_pages = self.nb_pages();
        if self.current_page > nb_pages {
            return Err(SearchError::PageOutOfRange {
                page: self.current_page,
                nb_pages,
            });
        }

        let offset = (self.current_page - 1) * self.max_per_page;
        Ok(self
            .hits
            .iter()
            .skip(offset)
            .take(self.max_per_page)
            .cloned()
            .collect())
    }
}

fn document_id(document: &Value) -> SearchResult<&str> {
    document
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| SearchError::InvalidDocument {
            message: "document must have a string _id".to_string(),
        })
}

/// Keeps only `fields` of a document; `None` keeps the whole document.
fn project(document: &Value, fields: Option<&[String]>) -> Value {
    let Some(fields) = fields else {
        return document.clone();
    };

    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = document.get(field) {
            projected.insert(field.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

fn compare_hits(a: &Value, b: &Value, terms: &[SortTerm]) -> Ordering {
    terms
        .iter()
        .map(|term| compare_field(field_value(a, &term.field), field_value(b, &term.field), term))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Looks up a possibly dotted field (`author.name`). Nulls count as missing.
fn field_value<'a>(document: &'a Value, field: &str) -> Option<&'a Value> {
    let pointer = format!("/{}", field.replace('.', "/"));
    document.pointer(&pointer).filter(|value| !value.is_null())
}

fn compare_field(a: Option<&Value>, b: Option<&Value>, term: &SortTerm) -> Ordering {
    let missing_rank = match term.missing {
        MissingPlacement::First => Ordering::Less,
        MissingPlacement::Last => Ordering::Greater,
    };

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => missing_rank,
        (Some(_), None) => missing_rank.reverse(),
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            match term.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
