use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, trace};

use rehydrate_core::config::HydrateSettings;
use rehydrate_core::error::{Error, Result};
use rehydrate_core::traits::HitClassifier;
use rehydrate_core::types::{EntityType, Hit};

use crate::cache::ResolutionCache;
use crate::classifier::{self, IndexAndType};
use crate::registry::TypeRegistry;

/// A classifier together with the resolutions it produced.
struct Generation {
    classifier: Arc<dyn HitClassifier>,
    cache: ResolutionCache,
}

impl Generation {
    fn new(classifier: Arc<dyn HitClassifier>) -> Self {
        Self { classifier, cache: ResolutionCache::new() }
    }
}

/// Resolves hits to registered entity types.
///
/// Swapping the classifier installs a fresh, empty cache. A resolution still
/// running against the previous classifier writes into the retired cache and
/// never becomes visible to later lookups.
pub struct Resolver {
    registry: Arc<TypeRegistry>,
    current: ArcSwap<Generation>,
}

impl Resolver {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self::with_classifier(registry, Arc::new(IndexAndType))
    }

    pub fn with_classifier(registry: Arc<TypeRegistry>, classifier: Arc<dyn HitClassifier>) -> Self {
        Self { registry, current: ArcSwap::from_pointee(Generation::new(classifier)) }
    }

    pub fn from_settings(registry: Arc<TypeRegistry>, settings: &HydrateSettings) -> Self {
        Self::with_classifier(registry, classifier::for_kind(settings.classifier))
    }

    pub fn registry(&self) -> &TypeRegistry { &self.registry }

    pub fn set_classifier(&self, classifier: Arc<dyn HitClassifier>) {
        debug!("classifier replaced, resolution cache reset");
        self.current.store(Arc::new(Generation::new(classifier)));
    }

    pub fn invalidate(&self) {
        self.current.load().cache.invalidate();
    }

    /// Number of `index::type` keys resolved under the active classifier.
    pub fn cached_keys(&self) -> usize { self.current.load().cache.len() }

    /// First registered type the classifier accepts, or `None`.
    ///
    /// Both outcomes are cached. Classifier errors are not.
    pub fn resolve(&self, hit: &Hit) -> Result<Option<Arc<EntityType>>> {
        let generation = self.current.load_full();
        let key = hit.resolution_key();
        if let Some(resolved) = generation.cache.get(&key) {
            trace!(%key, "resolution cache hit");
            return Ok(resolved);
        }

        let resolved = self.scan(generation.classifier.as_ref(), hit)?;
        debug!(%key, entity = ?resolved.as_ref().map(|e| e.name.as_str()), "resolved hit type");
        generation.cache.insert(key, resolved.clone());
        Ok(resolved)
    }

    fn scan(&self, classifier: &dyn HitClassifier, hit: &Hit) -> Result<Option<Arc<EntityType>>> {
        for entity in self.registry.iter() {
            let matched = classifier
                .classify(entity, hit)
                .map_err(|source| Error::Classifier { entity: entity.name.clone(), source })?;
            if matched {
                return Ok(Some(Arc::clone(entity)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TypeOnly;
    use rehydrate_core::config::ClassifierKind;
    use rehydrate_core::types::Backing;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entity(name: &str, index: &str, tag: &str) -> EntityType {
        EntityType::new(name, index, tag, Backing::Custom { source: name.to_lowercase() })
    }

    fn registry() -> Arc<TypeRegistry> {
        Arc::new(
            TypeRegistry::builder()
                .register(entity("Foo", "a", "foo"))
                .register(entity("Bar", "b", "bar"))
                .build()
                .expect("registry"),
        )
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl HitClassifier for Counting {
        fn classify(&self, entity: &EntityType, hit: &Hit) -> anyhow::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            IndexAndType.classify(entity, hit)
        }
    }

    #[test]
    fn default_classifier_matches_index_and_type() {
        let resolver = Resolver::new(registry());
        let bar = resolver.resolve(&Hit::new("b", "bar", "5")).expect("resolve");
        assert_eq!(bar.map(|e| e.name.clone()).as_deref(), Some("Bar"));
        assert!(resolver.resolve(&Hit::new("a", "bar", "5")).expect("resolve").is_none());
    }

    #[test]
    fn registry_is_scanned_once_per_key() {
        let counting = Arc::new(Counting::default());
        let resolver = Resolver::with_classifier(registry(), counting.clone());

        resolver.resolve(&Hit::new("b", "bar", "1")).expect("resolve");
        let after_first = counting.calls.load(Ordering::SeqCst);
        assert_eq!(after_first, 2, "Foo rejected, Bar accepted");

        resolver.resolve(&Hit::new("b", "bar", "2")).expect("resolve");
        resolver.resolve(&Hit::new("b", "bar", "3")).expect("resolve");
        assert_eq!(counting.calls.load(Ordering::SeqCst), after_first);
    }

    #[test]
    fn unresolved_outcome_is_cached() {
        let counting = Arc::new(Counting::default());
        let resolver = Resolver::with_classifier(registry(), counting.clone());

        assert!(resolver.resolve(&Hit::new("z", "zed", "1")).expect("resolve").is_none());
        assert!(resolver.resolve(&Hit::new("z", "zed", "2")).expect("resolve").is_none());
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_keys(), 1);
    }

    #[test]
    fn ties_go_to_first_registered_type() {
        let registry = Arc::new(
            TypeRegistry::builder()
                .register(entity("First", "one", "shared"))
                .register(entity("Second", "two", "shared"))
                .build()
                .expect("registry"),
        );
        let resolver = Resolver::with_classifier(registry, Arc::new(TypeOnly));
        for index in ["one", "two"] {
            let resolved = resolver.resolve(&Hit::new(index, "shared", "1")).expect("resolve");
            assert_eq!(resolved.map(|e| e.name.clone()).as_deref(), Some("First"));
        }
    }

    #[test]
    fn replacing_classifier_drops_cached_resolutions() {
        let resolver = Resolver::new(registry());
        let hit = Hit::new("elsewhere", "foo", "1");
        assert!(resolver.resolve(&hit).expect("resolve").is_none());
        assert_eq!(resolver.cached_keys(), 1);

        resolver.set_classifier(Arc::new(TypeOnly));
        assert_eq!(resolver.cached_keys(), 0);
        let resolved = resolver.resolve(&hit).expect("resolve");
        assert_eq!(resolved.map(|e| e.name.clone()).as_deref(), Some("Foo"));
    }

    #[test]
    fn invalidate_forces_rescan() {
        let counting = Arc::new(Counting::default());
        let resolver = Resolver::with_classifier(registry(), counting.clone());
        let hit = Hit::new("a", "foo", "1");
        resolver.resolve(&hit).expect("resolve");
        resolver.invalidate();
        resolver.resolve(&hit).expect("resolve");
        assert_eq!(counting.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn classifier_errors_propagate_and_are_not_cached() {
        struct Broken;
        impl HitClassifier for Broken {
            fn classify(&self, _entity: &EntityType, _hit: &Hit) -> anyhow::Result<bool> {
                Err(anyhow::anyhow!("classifier exploded"))
            }
        }

        let resolver = Resolver::with_classifier(registry(), Arc::new(Broken));
        let err = resolver.resolve(&Hit::new("a", "foo", "1")).expect_err("classifier error");
        assert!(matches!(err, Error::Classifier { ref entity, .. } if entity == "Foo"));
        assert_eq!(resolver.cached_keys(), 0);
    }

    #[test]
    fn settings_select_classifier() {
        let settings = HydrateSettings { classifier: ClassifierKind::TypeOnly };
        let resolver = Resolver::from_settings(registry(), &settings);
        assert!(resolver.resolve(&Hit::new("other", "bar", "1")).expect("resolve").is_some());
    }

    #[test]
    fn concurrent_first_use_agrees() {
        let resolver = Resolver::new(registry());
        let names: Vec<Option<String>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let resolver = &resolver;
                    s.spawn(move || {
                        resolver
                            .resolve(&Hit::new("a", "foo", i.to_string()))
                            .expect("resolve")
                            .map(|e| e.name.clone())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("join")).collect()
        });
        assert!(names.iter().all(|n| n.as_deref() == Some("Foo")));
        assert_eq!(resolver.cached_keys(), 1);
    }
}
