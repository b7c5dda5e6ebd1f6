//! In-memory drivers.
//!
//! Thread-safe reference implementations of the driver traits. Each one
//! counts the queries it serves so callers can check batching.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use rehydrate_core::traits::{DocumentDriver, EntityFinder, RelationalDriver};
use rehydrate_core::types::{identity_string, EntityType, Fields};

use crate::document::ID_FIELDS;

fn key_matches(row: &Fields, field: &str, wanted: &HashSet<&str>) -> bool {
    row.get(field).and_then(identity_string).is_some_and(|id| wanted.contains(id.as_str()))
}

/// Named tables of rows.
#[derive(Debug, Default)]
pub struct MemoryTables {
    tables: RwLock<HashMap<String, Vec<Fields>>>,
    queries: AtomicUsize,
}

impl MemoryTables {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, table: &str, row: Fields) {
        self.tables.write().entry(table.to_string()).or_default().push(row);
    }

    /// Deletes rows whose `key_column` equals `key`; returns how many went.
    pub fn delete(&self, table: &str, key_column: &str, key: &str) -> usize {
        let mut tables = self.tables.write();
        let Some(rows) = tables.get_mut(table) else { return 0 };
        let before = rows.len();
        rows.retain(|row| row.get(key_column).and_then(identity_string).as_deref() != Some(key));
        before - rows.len()
    }

    pub fn queries(&self) -> usize { self.queries.load(Ordering::SeqCst) }
}

#[async_trait]
impl RelationalDriver for MemoryTables {
    async fn select_in(&self, table: &str, key_column: &str, keys: &[String]) -> anyhow::Result<Vec<Fields>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let wanted: HashSet<&str> = keys.iter().map(String::as_str).collect();
        let tables = self.tables.read();
        let rows = tables.get(table).ok_or_else(|| anyhow::anyhow!("no such table: {}", table))?;
        Ok(rows.iter().filter(|row| key_matches(row, key_column, &wanted)).cloned().collect())
    }
}

/// Named collections of documents identified by `_id` (or `id`).
#[derive(Debug, Default)]
pub struct MemoryCollections {
    collections: RwLock<HashMap<String, Vec<Fields>>>,
    queries: AtomicUsize,
}

impl MemoryCollections {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, collection: &str, doc: Fields) {
        self.collections.write().entry(collection.to_string()).or_default().push(doc);
    }

    pub fn queries(&self) -> usize { self.queries.load(Ordering::SeqCst) }
}

#[async_trait]
impl DocumentDriver for MemoryCollections {
    async fn find_in(&self, collection: &str, ids: &[String]) -> anyhow::Result<Vec<Fields>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let collections = self.collections.read();
        // A missing collection is just empty, as in most document stores.
        let Some(docs) = collections.get(collection) else { return Ok(Vec::new()) };
        Ok(docs
            .iter()
            .filter(|doc| ID_FIELDS.iter().any(|field| key_matches(doc, field, &wanted)))
            .cloned()
            .collect())
    }
}

/// Records per entity name, fetched one id at a time.
#[derive(Debug, Default)]
pub struct MemoryFinder {
    records: RwLock<HashMap<String, HashMap<String, Fields>>>,
    lookups: AtomicUsize,
}

impl MemoryFinder {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&self, entity: &str, id: &str, fields: Fields) {
        self.records.write().entry(entity.to_string()).or_default().insert(id.to_string(), fields);
    }

    pub fn lookups(&self) -> usize { self.lookups.load(Ordering::SeqCst) }
}

#[async_trait]
impl EntityFinder for MemoryFinder {
    async fn find_one(&self, entity: &EntityType, id: &str) -> anyhow::Result<Option<Fields>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.read().get(&entity.name).and_then(|by_id| by_id.get(id)).cloned())
    }
}

/// `{ "id": .. }`-style helper for building rows from JSON literals.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}
