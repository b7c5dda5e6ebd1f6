use std::sync::Arc;

use rehydrate_core::types::{EntityType, Hit, Record};

use crate::loader::RecordsByType;

/// Records in hit order; unresolved hits and missing records leave no hole.
///
/// `resolved[i]` must be the resolution of `hits[i]`.
pub fn assemble(hits: &[Hit], resolved: &[Option<Arc<EntityType>>], records: &RecordsByType) -> Vec<Arc<Record>> {
    hits.iter()
        .zip(resolved)
        .filter_map(|(hit, entity)| {
            let entity = entity.as_ref()?;
            records.get(&entity.name)?.get(&hit.id).cloned()
        })
        .collect()
}
