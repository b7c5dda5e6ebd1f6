//! rehydrate-store
//!
//! Bulk-fetch strategies over relational, document and generic stores, the
//! selector that picks one per entity type, and in-memory drivers usable for
//! embedding and tests.

pub mod document;
pub mod fallback;
pub mod memory;
pub mod relational;
pub mod selector;

use std::sync::Arc;

use rehydrate_core::error::{Error, Result};
use rehydrate_core::types::{identity_string, EntityType, Fields, Record, RecordMap};

pub use document::DocumentBulk;
pub use fallback::GenericFallback;
pub use memory::{MemoryCollections, MemoryFinder, MemoryTables};
pub use relational::RelationalBulk;
pub use selector::{StrategySelector, StrategySelectorBuilder};

/// Keys rows by the first of `key_fields` carrying a usable identity.
pub(crate) fn keyed_records(entity: &EntityType, key_fields: &[&str], rows: Vec<Fields>) -> Result<RecordMap> {
    let mut records = RecordMap::with_capacity(rows.len());
    for row in rows {
        let id = key_fields
            .iter()
            .find_map(|field| row.get(*field).and_then(identity_string))
            .ok_or_else(|| Error::MissingIdentity {
                entity: entity.name.clone(),
                field: key_fields.join("|"),
            })?;
        records.insert(id.clone(), Arc::new(Record::new(entity.name.as_str(), id, row)));
    }
    Ok(records)
}

pub(crate) fn wrong_backing(entity: &EntityType, strategy: &'static str) -> Error {
    Error::InvalidConfig(format!("strategy '{}' cannot load entity type '{}' ({:?})", strategy, entity.name, entity.backing))
}
