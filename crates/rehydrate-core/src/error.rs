use thiserror::Error;

/// Hard failures of a hydration call.
///
/// Unresolved hits and missing records are not errors; they are dropped
/// from the result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Classifier failed on entity type '{entity}': {source}")]
    Classifier {
        entity: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Entity type '{entity}' returned a record without identity field '{field}'")]
    MissingIdentity { entity: String, field: String },

    #[error("Strategy '{strategy}' failed for entity type '{entity}': {source}")]
    Store {
        entity: String,
        strategy: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    pub fn store(entity: impl Into<String>, strategy: &'static str, source: anyhow::Error) -> Self {
        Self::Store { entity: entity.into(), strategy, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
