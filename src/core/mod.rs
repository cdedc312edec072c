//! Core domain types

pub mod embedding;
pub mod error;
pub mod item;
pub mod similarity;

pub use embedding::{EmbeddedItem, EmbeddingMetadata, EmbeddingSet, Point2};
pub use error::OracleError;
pub use item::{Catalog, Intensity, Item};
pub use similarity::{PairKey, Similarity, SimilarityMatrix};
