//! Numerical pipeline: vectorization, distances and 2D reduction

pub mod assemble;
pub mod distance;
pub mod eigen;
pub mod force;
pub mod mds;
pub mod pca;
pub mod reduce;
pub mod vectorize;

pub use assemble::assemble;
pub use distance::DistanceMatrix;
pub use eigen::{EigenSolver, Eigenpair, PowerIteration};
pub use force::ForceDirected;
pub use mds::ClassicalMds;
pub use reduce::{DimensionReducer, ReductionMethod};
pub use vectorize::{vectorize, FeatureSet, FeatureVector, Vocabulary};
