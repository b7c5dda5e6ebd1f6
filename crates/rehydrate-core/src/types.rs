//! Domain types shared by the resolver, the stores and the hydrator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub type RecordId = String;
pub type Fields = serde_json::Map<String, Value>;

/// Live records of one entity type keyed by their string identity.
pub type RecordMap = HashMap<RecordId, Arc<Record>>;

/// One raw match inside a search engine response.
///
/// - `source_index`: index the hit was read from
/// - `type_tag`: document type tag stored alongside the hit
/// - `id`: identity of the backing record, always a string on the wire
/// - `score`/`source`: opaque to hydration, kept for callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hit {
    #[serde(rename = "_index")]
    pub source_index: String,
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(rename = "_score", default)]
    pub score: Option<f32>,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl Hit {
    pub fn new(source_index: impl Into<String>, type_tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            source_index: source_index.into(),
            type_tag: type_tag.into(),
            id: id.into(),
            score: None,
            source: Value::Null,
        }
    }

    /// `index::type`, the key type resolutions are cached under.
    pub fn resolution_key(&self) -> String {
        format!("{}::{}", self.source_index, self.type_tag)
    }
}

/// Ordered hits as produced by the search client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took_ms: u64,
    #[serde(default)]
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

impl SearchResponse {
    pub fn from_hits(hits: Vec<Hit>) -> Self {
        let total_hits = hits.len() as u64;
        Self { took_ms: 0, total_hits, hits }
    }
}

/// Where the live records of an entity type are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Backing {
    /// Rows of `table`, addressed by `primary_key`.
    Relational { table: String, primary_key: String },
    /// Documents of `collection`, addressed by `_id`.
    Document { collection: String },
    /// Anything else; reached through a generic finder.
    Custom { source: String },
}

/// A registered domain type whose records can be hydrated.
///
/// `name` is the stable identity; two entity types with the same name are
/// the same type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    pub index_name: String,
    pub type_tag: String,
    pub backing: Backing,
}

impl EntityType {
    pub fn new(
        name: impl Into<String>,
        index_name: impl Into<String>,
        type_tag: impl Into<String>,
        backing: Backing,
    ) -> Self {
        Self { name: name.into(), index_name: index_name.into(), type_tag: type_tag.into(), backing }
    }
}

/// A live record loaded from a backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub id: RecordId,
    pub fields: Fields,
}

impl Record {
    pub fn new(entity: impl Into<String>, id: impl Into<String>, fields: Fields) -> Self {
        Self { entity: entity.into(), id: id.into(), fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// String form of an identity column.
///
/// Strings pass through and numbers are printed; anything else has no
/// usable identity.
pub fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
