//! Built-in hit classifiers.

use std::sync::Arc;

use rehydrate_core::config::ClassifierKind;
use rehydrate_core::traits::HitClassifier;
use rehydrate_core::types::{EntityType, Hit};

/// Matches when both the index name and the type tag agree. The default.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexAndType;

impl HitClassifier for IndexAndType {
    fn classify(&self, entity: &EntityType, hit: &Hit) -> anyhow::Result<bool> {
        Ok(entity.index_name == hit.source_index && entity.type_tag == hit.type_tag)
    }
}

/// Matches on the type tag alone, across indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeOnly;

impl HitClassifier for TypeOnly {
    fn classify(&self, entity: &EntityType, hit: &Hit) -> anyhow::Result<bool> {
        Ok(entity.type_tag == hit.type_tag)
    }
}

/// Adapts an infallible closure.
pub struct FnClassifier<F>(pub F);

impl<F> HitClassifier for FnClassifier<F>
where
    F: Fn(&EntityType, &Hit) -> bool + Send + Sync,
{
    fn classify(&self, entity: &EntityType, hit: &Hit) -> anyhow::Result<bool> {
        Ok((self.0)(entity, hit))
    }
}

pub fn for_kind(kind: ClassifierKind) -> Arc<dyn HitClassifier> {
    match kind {
        ClassifierKind::IndexAndType => Arc::new(IndexAndType),
        ClassifierKind::TypeOnly => Arc::new(TypeOnly),
    }
}
