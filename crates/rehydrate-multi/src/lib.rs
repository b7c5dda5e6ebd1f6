//! rehydrate-multi
//!
//! Turns a search response spanning several entity types back into live
//! records, in the engine's relevance order.
//!
//! ```rust,ignore
//! let hydrator = Hydrator::new(resolver, selector);
//! let records = hydrator.hydrate(&response).await?;
//! ```

mod assemble;
mod group;
mod loader;

use std::sync::Arc;

use tracing::{debug, instrument};

use rehydrate_core::config::{Config, HydrateSettings};
use rehydrate_core::error::Result;
use rehydrate_core::types::{Record, SearchResponse};
use rehydrate_resolve::{Resolver, TypeRegistry};
use rehydrate_store::StrategySelector;

use crate::assemble::assemble;
use crate::group::{IdsByType, Resolutions};
use crate::loader::BatchLoader;

pub struct Hydrator {
    resolver: Arc<Resolver>,
    loader: BatchLoader,
}

impl Hydrator {
    pub fn new(resolver: Arc<Resolver>, selector: Arc<StrategySelector>) -> Self {
        Self { resolver, loader: BatchLoader::new(selector) }
    }

    /// Picks the classifier from the `[hydrate]` config section.
    pub fn from_config(config: &Config, registry: Arc<TypeRegistry>, selector: Arc<StrategySelector>) -> Result<Self> {
        let settings = HydrateSettings::from_config(config)?;
        debug!(classifier = ?settings.classifier, types = registry.len(), "building hydrator");
        Ok(Self::new(Arc::new(Resolver::from_settings(registry, &settings)), selector))
    }

    /// Shared so the classifier can be swapped at runtime.
    pub fn resolver(&self) -> &Arc<Resolver> { &self.resolver }

    /// Live records for `response.hits`, in hit order.
    ///
    /// Hits no entity type claims and hits whose record is gone are left
    /// out. Store, classifier and identity failures fail the whole call.
    #[instrument(skip_all, fields(hits = response.hits.len()))]
    pub async fn hydrate(&self, response: &SearchResponse) -> Result<Vec<Arc<Record>>> {
        let resolved = response
            .hits
            .iter()
            .map(|hit| self.resolver.resolve(hit))
            .collect::<Result<Resolutions>>()?;

        let ids_by_type = IdsByType::group(&response.hits, &resolved);
        let records = self.loader.load_all(&ids_by_type).await?;
        let hydrated = assemble(&response.hits, &resolved, &records);

        let unresolved = resolved.iter().filter(|r| r.is_none()).count();
        debug!(
            types = ids_by_type.len(),
            unresolved,
            missing = response.hits.len() - unresolved - hydrated.len(),
            returned = hydrated.len(),
            "hydrated search response"
        );
        Ok(hydrated)
    }
}
