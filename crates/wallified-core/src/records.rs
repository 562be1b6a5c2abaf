//! Record store contract.
//!
//! Products, collections, orders, designs and admin accounts live in a hosted
//! row/document store. The application talks to it through a small generic
//! query interface: equality and case-insensitive pattern filters, a single
//! ordering column, an optional limit, and row counts.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use uuid::Uuid;

use crate::error::RecordError;

/// A single row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals value exactly
    Eq { column: String, value: Value },
    /// Column matches an SQL `ILIKE` pattern (`%` any run, `_` one char)
    ILike { column: String, pattern: String },
}

impl Filter {
    /// Check a record against this predicate
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        match self {
            Filter::Eq { column, value } => record.get(column) == Some(value),
            Filter::ILike { column, pattern } => record
                .get(column)
                .and_then(Value::as_str)
                .is_some_and(|text| ilike(text, pattern)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A query against one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    filters: Vec<Filter>,
    order: Option<(String, SortOrder)>,
    limit: Option<usize>,
}

impl Query {
    /// Start a query on `collection` matching every row
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Require `column == value`
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Require `column ILIKE pattern`
    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike {
            column: column.into(),
            pattern: pattern.into(),
        });
        self
    }

    /// Order results by `column`
    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order = Some((column.into(), order));
        self
    }

    /// Return at most `limit` rows
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Check a record against every filter
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Generic row/document store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows matching `query`, ordered and limited as requested
    async fn select(&self, query: &Query) -> Result<Vec<Value>, RecordError>;

    /// Insert one JSON object and return it as stored (with `id` and `created_at`)
    async fn insert(&self, collection: &str, record: Value) -> Result<Value, RecordError>;

    /// Merge `patch` into every matching row and return the updated rows
    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, RecordError>;

    /// Delete every matching row and return how many were removed
    async fn delete(&self, query: &Query) -> Result<usize, RecordError>;

    /// Count matching rows (ordering and limit are ignored)
    async fn count(&self, query: &Query) -> Result<usize, RecordError>;
}

/// Case-insensitive SQL `LIKE` matching.
pub fn ilike(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();

    // matched[i]: the pattern prefix seen so far matches text[..i]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;
    for p in pattern {
        let mut next = vec![false; text.len() + 1];
        match p {
            '%' => {
                let mut any = false;
                for i in 0..=text.len() {
                    any |= matched[i];
                    next[i] = any;
                }
            }
            '_' => {
                for i in 1..=text.len() {
                    next[i] = matched[i - 1];
                }
            }
            c => {
                for i in 1..=text.len() {
                    next[i] = matched[i - 1] && text[i - 1] == c;
                }
            }
        }
        matched = next;
    }
    matched[text.len()]
}

/// Nulls and missing values sort first; mismatched types compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone)]
struct StoredRow {
    seq: u64,
    record: Map<String, Value>,
}

#[derive(Debug, Default)]
struct Tables {
    next_seq: u64,
    rows: HashMap<String, Vec<StoredRow>>,
}

/// In-memory record store for development and tests
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage (`false`) or recovery (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, AtomicOrdering::SeqCst);
    }

    /// Number of rows in `collection`
    pub fn len(&self, collection: &str) -> usize {
        self.tables
            .read()
            .rows
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn ensure_available(&self) -> Result<(), RecordError> {
        if self.available.load(AtomicOrdering::SeqCst) {
            Ok(())
        } else {
            Err(RecordError::Unavailable)
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, RecordError> {
        self.ensure_available()?;
        let tables = self.tables.read();
        let Some(rows) = tables.rows.get(query.collection()) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<&StoredRow> =
            rows.iter().filter(|row| query.matches(&row.record)).collect();

        if let Some((column, order)) = &query.order {
            matched.sort_by(|a, b| {
                let ord = compare_values(a.record.get(column), b.record.get(column))
                    .then(a.seq.cmp(&b.seq));
                match order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|row| Value::Object(row.record.clone()))
            .collect())
    }

    async fn insert(&self, collection: &str, record: Value) -> Result<Value, RecordError> {
        self.ensure_available()?;
        let Value::Object(mut record) = record else {
            return Err(RecordError::InvalidRecord {
                collection: collection.to_string(),
                reason: "record must be a JSON object".to_string(),
            });
        };

        record
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        record
            .entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        let mut tables = self.tables.write();
        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables
            .rows
            .entry(collection.to_string())
            .or_default()
            .push(StoredRow {
                seq,
                record: record.clone(),
            });

        tracing::debug!("Inserted row into '{}'", collection);
        Ok(Value::Object(record))
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>, RecordError> {
        self.ensure_available()?;
        let Value::Object(patch) = patch else {
            return Err(RecordError::InvalidRecord {
                collection: query.collection().to_string(),
                reason: "patch must be a JSON object".to_string(),
            });
        };

        let mut tables = self.tables.write();
        let Some(rows) = tables.rows.get_mut(query.collection()) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| query.matches(&row.record)) {
            for (key, value) in &patch {
                row.record.insert(key.clone(), value.clone());
            }
            updated.push(Value::Object(row.record.clone()));
        }
        Ok(updated)
    }

    async fn delete(&self, query: &Query) -> Result<usize, RecordError> {
        self.ensure_available()?;
        let mut tables = self.tables.write();
        let Some(rows) = tables.rows.get_mut(query.collection()) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !query.matches(&row.record));
        Ok(before - rows.len())
    }

    async fn count(&self, query: &Query) -> Result<usize, RecordError> {
        self.ensure_available()?;
        let tables = self.tables.read();
        Ok(tables.rows.get(query.collection()).map_or(0, |rows| {
            rows.iter().filter(|row| query.matches(&row.record)).count()
        }))
    }
}
