use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use rehydrate_core::error::Result;
use rehydrate_core::types::RecordMap;
use rehydrate_store::StrategySelector;

use crate::group::IdsByType;

/// Live records per entity name.
pub type RecordsByType = HashMap<String, RecordMap>;

/// One strategy call per entity type, all types in flight together.
pub struct BatchLoader {
    selector: Arc<StrategySelector>,
}

impl BatchLoader {
    pub fn new(selector: Arc<StrategySelector>) -> Self { Self { selector } }

    /// Every load runs to completion; the first failure in type order is
    /// returned instead of a partial result.
    pub async fn load_all(&self, ids_by_type: &IdsByType) -> Result<RecordsByType> {
        let loads = ids_by_type.iter().map(|group| async move {
            let strategy = self.selector.select(&group.entity);
            let ids: Vec<String> = group.ids.iter().cloned().collect();
            debug!(entity = %group.entity.name, strategy = strategy.name(), ids = ids.len(), "loading records");
            let outcome = strategy.fetch(&group.entity, &ids).await;
            if let Err(e) = &outcome {
                warn!(entity = %group.entity.name, strategy = strategy.name(), error = %e, "bulk fetch failed");
            }
            (group.entity.name.clone(), outcome)
        });

        let mut records = RecordsByType::with_capacity(ids_by_type.len());
        for (entity, outcome) in join_all(loads).await {
            records.insert(entity, outcome?);
        }
        Ok(records)
    }
}
