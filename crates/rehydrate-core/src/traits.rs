use async_trait::async_trait;

use crate::error::Result;
use crate::types::{EntityType, Fields, Hit, RecordMap};

/// Decides whether `hit` was produced by `entity`.
///
/// Must only look at type-level fields and the hit envelope, never at the
/// hit payload: its answer is cached per `index::type` pair.
pub trait HitClassifier: Send + Sync {
    fn classify(&self, entity: &EntityType, hit: &Hit) -> anyhow::Result<bool>;
}

/// Bulk-fetches the live records of one entity type.
#[async_trait]
pub trait BulkFetch: Send + Sync {
    fn name(&self) -> &'static str;

    /// Ids with no live record are absent from the returned map.
    async fn fetch(&self, entity: &EntityType, ids: &[String]) -> Result<RecordMap>;
}

/// Driver for SQL-like stores: `select * from table where key_column in (keys)`.
#[async_trait]
pub trait RelationalDriver: Send + Sync {
    async fn select_in(&self, table: &str, key_column: &str, keys: &[String]) -> anyhow::Result<Vec<Fields>>;
}

/// Driver for document stores: `find { _id: { $in: ids } }` on a collection.
#[async_trait]
pub trait DocumentDriver: Send + Sync {
    async fn find_in(&self, collection: &str, ids: &[String]) -> anyhow::Result<Vec<Fields>>;
}

/// Generic per-record lookup for stores without a bulk driver.
#[async_trait]
pub trait EntityFinder: Send + Sync {
    async fn find_one(&self, entity: &EntityType, id: &str) -> anyhow::Result<Option<Fields>>;

    /// Defaults to one `find_one` per id, in order.
    async fn find_many(&self, entity: &EntityType, ids: &[String]) -> anyhow::Result<Vec<(String, Fields)>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(fields) = self.find_one(entity, id).await? {
                found.push((id.clone(), fields));
            }
        }
        Ok(found)
    }
}
