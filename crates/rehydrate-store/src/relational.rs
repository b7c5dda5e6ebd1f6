use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use rehydrate_core::error::{Error, Result};
use rehydrate_core::traits::{BulkFetch, RelationalDriver};
use rehydrate_core::types::{Backing, EntityType, RecordMap};

use crate::{keyed_records, wrong_backing};

/// One `where primary_key in (...)` query per entity type.
///
/// Rows are keyed by their own primary key, so numeric keys come back as
/// their decimal string.
pub struct RelationalBulk {
    driver: Arc<dyn RelationalDriver>,
}

impl RelationalBulk {
    pub const NAME: &'static str = "relational-bulk";

    pub fn new(driver: Arc<dyn RelationalDriver>) -> Self { Self { driver } }
}

#[async_trait]
impl BulkFetch for RelationalBulk {
    fn name(&self) -> &'static str { Self::NAME }

    async fn fetch(&self, entity: &EntityType, ids: &[String]) -> Result<RecordMap> {
        let Backing::Relational { table, primary_key } = &entity.backing else {
            return Err(wrong_backing(entity, Self::NAME));
        };
        let rows = self
            .driver
            .select_in(table, primary_key, ids)
            .await
            .map_err(|e| Error::store(entity.name.as_str(), Self::NAME, e))?;
        debug!(entity = %entity.name, %table, requested = ids.len(), found = rows.len(), "relational bulk fetch");
        keyed_records(entity, &[primary_key.as_str()], rows)
    }
}
