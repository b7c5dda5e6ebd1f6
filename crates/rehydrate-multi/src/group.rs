use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use rehydrate_core::types::{EntityType, Hit};

/// Resolution of each hit, index-aligned with the hits it came from.
pub type Resolutions = Vec<Option<Arc<EntityType>>>;

pub struct TypeGroup {
    pub entity: Arc<EntityType>,
    /// First-seen order, without repeats.
    pub ids: IndexSet<String>,
}

/// Hit ids per resolved entity type, types in first-seen order.
#[derive(Default)]
pub struct IdsByType {
    groups: IndexMap<String, TypeGroup>,
}

impl IdsByType {
    /// Unresolved hits are left out.
    pub fn group(hits: &[Hit], resolved: &[Option<Arc<EntityType>>]) -> Self {
        let mut groups: IndexMap<String, TypeGroup> = IndexMap::new();
        for (hit, entity) in hits.iter().zip(resolved) {
            let Some(entity) = entity else { continue };
            groups
                .entry(entity.name.clone())
                .or_insert_with(|| TypeGroup { entity: Arc::clone(entity), ids: IndexSet::new() })
                .ids
                .insert(hit.id.clone());
        }
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeGroup> { self.groups.values() }

    pub fn len(&self) -> usize { self.groups.len() }

    #[cfg(test)]
    pub fn ids(&self, entity: &str) -> Option<Vec<&str>> {
        self.groups.get(entity).map(|g| g.ids.iter().map(String::as_str).collect())
    }
}
