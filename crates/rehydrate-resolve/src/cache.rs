use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rehydrate_core::types::EntityType;

/// Resolved entity type per `index::type` key.
///
/// `None` entries record that no registered type matched. Entries are never
/// evicted; `invalidate` drops all of them at once.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, Option<Arc<EntityType>>>>,
}

impl ResolutionCache {
    pub fn new() -> Self { Self::default() }

    /// Outer `None` is a miss; `Some(None)` is a cached "no match".
    pub fn get(&self, key: &str) -> Option<Option<Arc<EntityType>>> {
        self.entries.read().get(key).cloned()
    }

    /// Last writer wins.
    pub fn insert(&self, key: String, resolved: Option<Arc<EntityType>>) {
        self.entries.write().insert(key, resolved);
    }

    pub fn invalidate(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize { self.entries.read().len() }

    pub fn is_empty(&self) -> bool { self.entries.read().is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehydrate_core::types::Backing;

    #[test]
    fn distinguishes_miss_from_cached_no_match() {
        let cache = ResolutionCache::new();
        assert!(cache.get("a::foo").is_none());
        cache.insert("a::foo".into(), None);
        assert_eq!(cache.get("a::foo"), Some(None));
    }

    #[test]
    fn invalidate_clears_everything() {
        let cache = ResolutionCache::new();
        let foo = Arc::new(EntityType::new("Foo", "a", "foo", Backing::Custom { source: "foo".into() }));
        cache.insert("a::foo".into(), Some(foo));
        cache.insert("b::bar".into(), None);
        assert_eq!(cache.len(), 2);
        cache.invalidate();
        assert!(cache.is_empty());
    }
}
