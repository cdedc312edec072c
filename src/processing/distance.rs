//! Distance matrices derived from similarity judgments or feature vectors

use anyhow::Result;
use ndarray::Array2;
use rayon::prelude::*;

use super::vectorize::FeatureSet;
use crate::core::{Similarity, SimilarityMatrix};

/// Symmetric n x n matrix with zero diagonal and entries in [0.0, 1.0]
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
	ids: Vec<String>,
	data: Array2<f64>,
}

impl DistanceMatrix {
	/// Converts similarities to distances: (max - s) / (max - min), clamped
	///
	/// Pairs without a judgment use `missing`, so gaps pull neither toward
	/// nor away from each other.
	pub fn from_similarities(matrix: &SimilarityMatrix, missing: Similarity) -> Self {
		let n = matrix.len();
		let mut data = Array2::<f64>::zeros((n, n));

		for i in 0..n {
			for j in (i + 1)..n {
				let s = matrix.get_or(i, j, missing);
				let d = similarity_to_distance(s);
				data[[i, j]] = d;
				data[[j, i]] = d;
			}
		}

		Self {
			ids: matrix.ids().to_vec(),
			data,
		}
	}

	/// Cosine distances between TF-IDF vectors
	pub fn from_features(features: &FeatureSet) -> Self {
		let n = features.vectors.len();

		let rows: Vec<Vec<f64>> = (0..n)
			.into_par_iter()
			.map(|i| {
				(0..n)
					.map(|j| {
						if i == j {
							0.0
						} else {
							let s = features.vectors[i].cosine(&features.vectors[j]);
							similarity_to_distance(Similarity::clamped(s))
						}
					})
					.collect()
			})
			.collect();

		let mut data = Array2::<f64>::zeros((n, n));
		for (i, row) in rows.iter().enumerate() {
			for (j, &d) in row.iter().enumerate() {
				data[[i, j]] = d;
			}
		}

		Self {
			ids: features.ids.clone(),
			data,
		}
	}

	/// Wraps precomputed distances, enforcing the matrix invariants
	///
	/// The upper triangle wins over the lower one, entries are clamped into
	/// [0.0, 1.0] and the diagonal is zeroed.
	pub fn from_raw(ids: Vec<String>, mut data: Array2<f64>) -> Result<Self> {
		let n = ids.len();
		if data.nrows() != n || data.ncols() != n {
			anyhow::bail!(
				"Distance matrix is {}x{}, expected {}x{}",
				data.nrows(),
				data.ncols(),
				n,
				n
			);
		}

		for i in 0..n {
			data[[i, i]] = 0.0;
			for j in (i + 1)..n {
				let d = data[[i, j]];
				let d = if d.is_nan() { 0.0 } else { d.clamp(0.0, 1.0) };
				data[[i, j]] = d;
				data[[j, i]] = d;
			}
		}

		Ok(Self { ids, data })
	}

	pub fn ids(&self) -> &[String] {
		&self.ids
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn get(&self, i: usize, j: usize) -> f64 {
		self.data[[i, j]]
	}

	pub fn as_array(&self) -> &Array2<f64> {
		&self.data
	}

	/// True when every off-diagonal entry is the same value
	pub fn is_uniform(&self) -> bool {
		let n = self.len();
		if n < 2 {
			return true;
		}
		let first = self.data[[0, 1]];
		(0..n).all(|i| ((i + 1)..n).all(|j| (self.data[[i, j]] - first).abs() < 1e-12))
	}
}

fn similarity_to_distance(s: Similarity) -> f64 {
	let max = Similarity::MAX.value();
	let min = Similarity::MIN.value();
	((max - s.value()) / (max - min)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn distance_is_one_minus_similarity() {
		let mut sims = SimilarityMatrix::new(ids(&["a", "b", "c"]));
		sims.set("a", "b", Similarity::new(0.8).unwrap());
		sims.set("c", "a", Similarity::new(0.1).unwrap());

		let dm = DistanceMatrix::from_similarities(&sims, Similarity::new(0.5).unwrap());
		assert!((dm.get(0, 1) - 0.2).abs() < 1e-12);
		assert!((dm.get(2, 0) - 0.9).abs() < 1e-12);
		// b-c was never judged
		assert!((dm.get(1, 2) - 0.5).abs() < 1e-12);
		assert_eq!(dm.get(1, 1), 0.0);
	}

	#[test]
	fn raw_matrix_is_sanitized() {
		let data = ndarray::array![[0.3, 2.0], [0.0, 0.7]];
		let dm = DistanceMatrix::from_raw(ids(&["a", "b"]), data).unwrap();
		assert_eq!(dm.get(0, 0), 0.0);
		assert_eq!(dm.get(1, 1), 0.0);
		assert_eq!(dm.get(0, 1), 1.0);
		assert_eq!(dm.get(1, 0), 1.0);
	}

	#[test]
	fn raw_matrix_rejects_wrong_shape() {
		let data = Array2::<f64>::zeros((2, 3));
		assert!(DistanceMatrix::from_raw(ids(&["a", "b"]), data).is_err());
	}
}
