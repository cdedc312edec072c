//! Persistence: similarity cache and catalog files

pub mod cache;
pub mod catalog;

pub use cache::{CacheEntry, CacheFormat, CacheStats, ScoreSource, SimilarityCache};
pub use catalog::load_catalog;
