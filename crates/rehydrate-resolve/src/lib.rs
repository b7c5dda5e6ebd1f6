//! rehydrate-resolve
//!
//! Maps raw search hits to the registered entity type that produced them.
//! Resolutions are memoised per `index::type` pair in a cache owned by the
//! `Resolver`, which is dropped whenever the classifier is replaced.

pub mod cache;
pub mod classifier;
pub mod registry;
pub mod resolver;

pub use cache::ResolutionCache;
pub use classifier::{FnClassifier, IndexAndType, TypeOnly};
pub use registry::{TypeRegistry, TypeRegistryBuilder};
pub use resolver::Resolver;
