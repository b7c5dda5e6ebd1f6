use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use rehydrate_core::error::{Error, Result};
use rehydrate_core::traits::{BulkFetch, EntityFinder};
use rehydrate_core::types::{EntityType, Record, RecordMap};

/// Used for entity types no specialised strategy claims.
pub struct GenericFallback {
    finder: Arc<dyn EntityFinder>,
}

impl GenericFallback {
    pub const NAME: &'static str = "generic-fallback";

    pub fn new(finder: Arc<dyn EntityFinder>) -> Self { Self { finder } }
}

#[async_trait]
impl BulkFetch for GenericFallback {
    fn name(&self) -> &'static str { Self::NAME }

    async fn fetch(&self, entity: &EntityType, ids: &[String]) -> Result<RecordMap> {
        let found = self
            .finder
            .find_many(entity, ids)
            .await
            .map_err(|e| Error::store(entity.name.as_str(), Self::NAME, e))?;
        debug!(entity = %entity.name, requested = ids.len(), found = found.len(), "generic fetch");
        Ok(found
            .into_iter()
            .map(|(id, fields)| {
                let record = Arc::new(Record::new(entity.name.as_str(), id.as_str(), fields));
                (id, record)
            })
            .collect())
    }
}
