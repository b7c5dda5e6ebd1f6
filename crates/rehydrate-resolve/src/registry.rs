use std::collections::HashSet;
use std::sync::Arc;

use rehydrate_core::error::{Error, Result};
use rehydrate_core::types::EntityType;

/// Entity types taking part in hydration, in registration order.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<Arc<EntityType>>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder { TypeRegistryBuilder::default() }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityType>> { self.types.iter() }

    pub fn get(&self, name: &str) -> Option<&Arc<EntityType>> { self.types.iter().find(|t| t.name == name) }

    pub fn len(&self) -> usize { self.types.len() }

    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    types: Vec<EntityType>,
}

impl TypeRegistryBuilder {
    pub fn register(mut self, entity: EntityType) -> Self {
        self.types.push(entity);
        self
    }

    /// Rejects unnamed types and duplicate names.
    pub fn build(self) -> Result<TypeRegistry> {
        let mut seen = HashSet::new();
        for entity in &self.types {
            if entity.name.trim().is_empty() {
                return Err(Error::InvalidConfig("entity type without a name".to_string()));
            }
            if !seen.insert(entity.name.as_str()) {
                return Err(Error::InvalidConfig(format!("entity type '{}' registered twice", entity.name)));
            }
        }
        Ok(TypeRegistry { types: self.types.into_iter().map(Arc::new).collect() })
    }
}
