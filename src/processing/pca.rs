//! Principal component projection of TF-IDF vectors

use anyhow::Result;
use ndarray::Array2;

use super::eigen::EigenSolver;
use super::vectorize::FeatureSet;
use crate::core::Point2;

/// Projects each item onto the first two principal axes of its feature vector
///
/// Works on the n x n Gram matrix of the column-centered features, which
/// gives the same scores as the covariance route while staying small when
/// the vocabulary is larger than the catalog.
pub fn project<S: EigenSolver>(features: &FeatureSet, solver: &S) -> Result<Vec<Point2>> {
	let n = features.vectors.len();
	if n < 2 {
		anyhow::bail!("Need at least 2 items for PCA, got {}", n);
	}
	let m = features.vocabulary.len();

	let mut centered = Array2::<f64>::zeros((n, m));
	for (i, v) in features.vectors.iter().enumerate() {
		for j in 0..m {
			centered[[i, j]] = v.get(j);
		}
	}
	for j in 0..m {
		let mean = (0..n).map(|i| centered[[i, j]]).sum::<f64>() / n as f64;
		for i in 0..n {
			centered[[i, j]] -= mean;
		}
	}

	let gram = centered.dot(&centered.t());
	let pairs = solver.top_eigenpairs(&gram, 2);

	let axis = |k: usize, i: usize| -> f64 {
		pairs
			.get(k)
			.map(|p| p.value.abs().sqrt() * p.vector[i])
			.unwrap_or(0.0)
	};

	Ok((0..n).map(|i| Point2::new(axis(0, i), axis(1, i))).collect())
}
