use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use rehydrate_core::error::{Error, Result};
use rehydrate_core::traits::{BulkFetch, DocumentDriver};
use rehydrate_core::types::{Backing, EntityType, RecordMap};

use crate::{keyed_records, wrong_backing};

/// Document identity fields, in lookup order.
pub const ID_FIELDS: [&str; 2] = ["_id", "id"];

/// One `_id in [...]` lookup per entity type.
pub struct DocumentBulk {
    driver: Arc<dyn DocumentDriver>,
}

impl DocumentBulk {
    pub const NAME: &'static str = "document-bulk";

    pub fn new(driver: Arc<dyn DocumentDriver>) -> Self { Self { driver } }
}

#[async_trait]
impl BulkFetch for DocumentBulk {
    fn name(&self) -> &'static str { Self::NAME }

    async fn fetch(&self, entity: &EntityType, ids: &[String]) -> Result<RecordMap> {
        let Backing::Document { collection } = &entity.backing else {
            return Err(wrong_backing(entity, Self::NAME));
        };
        let docs = self
            .driver
            .find_in(collection, ids)
            .await
            .map_err(|e| Error::store(entity.name.as_str(), Self::NAME, e))?;
        debug!(entity = %entity.name, %collection, requested = ids.len(), found = docs.len(), "document bulk fetch");
        keyed_records(entity, &ID_FIELDS, docs)
    }
}
