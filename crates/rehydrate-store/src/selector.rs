use std::sync::Arc;

use tracing::trace;

use rehydrate_core::traits::{BulkFetch, DocumentDriver, RelationalDriver};
use rehydrate_core::types::{Backing, EntityType};

use crate::document::DocumentBulk;
use crate::relational::RelationalBulk;

type Predicate = Box<dyn Fn(&EntityType) -> bool + Send + Sync>;

/// Ordered `(predicate, strategy)` table with a generic fallback.
///
/// Built once by the persistence integration layer; lookups are pure.
pub struct StrategySelector {
    rules: Vec<(Predicate, Arc<dyn BulkFetch>)>,
    fallback: Arc<dyn BulkFetch>,
}

impl StrategySelector {
    pub fn builder(fallback: Arc<dyn BulkFetch>) -> StrategySelectorBuilder {
        StrategySelectorBuilder { rules: Vec::new(), fallback }
    }

    /// First matching rule's strategy, else the fallback.
    pub fn select(&self, entity: &EntityType) -> Arc<dyn BulkFetch> {
        let strategy = self
            .rules
            .iter()
            .find(|(predicate, _)| predicate(entity))
            .map_or(&self.fallback, |(_, strategy)| strategy);
        trace!(entity = %entity.name, strategy = strategy.name(), "selected strategy");
        Arc::clone(strategy)
    }
}

pub struct StrategySelectorBuilder {
    rules: Vec<(Predicate, Arc<dyn BulkFetch>)>,
    fallback: Arc<dyn BulkFetch>,
}

impl StrategySelectorBuilder {
    pub fn rule<P>(mut self, predicate: P, strategy: Arc<dyn BulkFetch>) -> Self
    where
        P: Fn(&EntityType) -> bool + Send + Sync + 'static,
    {
        self.rules.push((Box::new(predicate), strategy));
        self
    }

    /// Routes every `Backing::Relational` type through `driver`.
    pub fn relational(self, driver: Arc<dyn RelationalDriver>) -> Self {
        self.rule(
            |e: &EntityType| matches!(e.backing, Backing::Relational { .. }),
            Arc::new(RelationalBulk::new(driver)),
        )
    }

    /// Routes every `Backing::Document` type through `driver`.
    pub fn document(self, driver: Arc<dyn DocumentDriver>) -> Self {
        self.rule(
            |e: &EntityType| matches!(e.backing, Backing::Document { .. }),
            Arc::new(DocumentBulk::new(driver)),
        )
    }

    pub fn build(self) -> StrategySelector {
        StrategySelector { rules: self.rules, fallback: self.fallback }
    }
}
