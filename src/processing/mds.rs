//! Classical (metric) multidimensional scaling

use anyhow::Result;
use ndarray::Array2;

use super::distance::DistanceMatrix;
use super::eigen::{EigenSolver, PowerIteration};
use super::reduce::{require_embeddable, DimensionReducer};
use crate::core::Point2;
use crate::ui;

/// Embeds items by double centering squared distances and taking the two
/// leading eigenvectors of the result
///
/// Negative eigenvalues (non-Euclidean input) are used by absolute value, so
/// the layout is an approximation rather than an exact distance preserver.
#[derive(Debug, Clone, Default)]
pub struct ClassicalMds<S = PowerIteration> {
	solver: S,
}

impl<S: EigenSolver> ClassicalMds<S> {
	pub fn new(solver: S) -> Self {
		Self { solver }
	}
}

impl<S: EigenSolver> DimensionReducer for ClassicalMds<S> {
	fn reduce(&self, distances: &DistanceMatrix) -> Result<Vec<Point2>> {
		require_embeddable(distances)?;

		let b = double_center(distances.as_array());
		let pairs = self.solver.top_eigenpairs(&b, 2);

		ui::debug(&format!(
			"MDS eigenvalues: {}",
			pairs
				.iter()
				.map(|p| format!("{:.4}", p.value))
				.collect::<Vec<_>>()
				.join(", ")
		));

		let axis = |k: usize, i: usize| -> f64 {
			pairs
				.get(k)
				.map(|p| p.value.abs().sqrt() * p.vector[i])
				.unwrap_or(0.0)
		};

		Ok((0..distances.len())
			.map(|i| Point2::new(axis(0, i), axis(1, i)))
			.collect())
	}

	fn name(&self) -> &'static str {
		"classical MDS"
	}
}

/// B = -1/2 (D² - row mean - column mean + grand mean)
pub fn double_center(distances: &Array2<f64>) -> Array2<f64> {
	let n = distances.nrows();
	let squared = distances.mapv(|d| d * d);

	let mut row_means = vec![0.0; n];
	let mut col_means = vec![0.0; n];
	let mut grand_mean = 0.0;
	for i in 0..n {
		for j in 0..n {
			let v = squared[[i, j]];
			row_means[i] += v;
			col_means[j] += v;
			grand_mean += v;
		}
	}
	if n > 0 {
		let nf = n as f64;
		row_means.iter_mut().for_each(|m| *m /= nf);
		col_means.iter_mut().for_each(|m| *m /= nf);
		grand_mean /= nf * nf;
	}

	Array2::from_shape_fn((n, n), |(i, j)| {
		-0.5 * (squared[[i, j]] - row_means[i] - col_means[j] + grand_mean)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn double_centered_rows_sum_to_zero() {
		let d = array![[0.0, 0.3, 0.8], [0.3, 0.0, 0.6], [0.8, 0.6, 0.0]];
		let b = double_center(&d);
		for i in 0..3 {
			let row: f64 = (0..3).map(|j| b[[i, j]]).sum();
			let col: f64 = (0..3).map(|j| b[[j, i]]).sum();
			assert!(row.abs() < 1e-12);
			assert!(col.abs() < 1e-12);
		}
	}

	#[test]
	fn recovers_euclidean_distances() {
		// 3-4-5 right triangle scaled into [0, 1]
		let d = array![[0.0, 0.3, 0.4], [0.3, 0.0, 0.5], [0.4, 0.5, 0.0]];
		let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
		let dm = DistanceMatrix::from_raw(ids, d.clone()).unwrap();
		let points = ClassicalMds::new(PowerIteration::new(300, 3)).reduce(&dm).unwrap();
		for i in 0..3 {
			for j in 0..3 {
				assert!((points[i].distance(&points[j]) - d[[i, j]]).abs() < 1e-4);
			}
		}
	}
}
