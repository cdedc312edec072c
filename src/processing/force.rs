//! Force-directed stress minimization

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distance::DistanceMatrix;
use super::reduce::{require_embeddable, DimensionReducer};
use crate::config::{FORCE_ITERATIONS, LEARNING_RATE, MIN_DISTANCE};
use crate::core::Point2;

/// Damped gradient descent on pairwise stress
///
/// Every iteration, each pair pulls together when further apart than its
/// target distance and pushes apart when closer. Displacements are summed
/// per item and applied at once. Runs a fixed number of iterations; the
/// result is a local minimum at best.
#[derive(Debug, Clone, Copy)]
pub struct ForceDirected {
	pub iterations: usize,
	pub learning_rate: f64,
	pub seed: u64,
}

impl ForceDirected {
	pub fn new(iterations: usize, learning_rate: f64, seed: u64) -> Self {
		Self {
			iterations,
			learning_rate,
			seed,
		}
	}

	/// Runs the fixed number of synchronous update rounds from `positions`
	fn relax(&self, distances: &DistanceMatrix, mut positions: Vec<Point2>) -> Vec<Point2> {
		let n = positions.len();
		if n < 2 {
			return positions;
		}

		// Average over neighbours so step size does not grow with n
		let scale = self.learning_rate / (n - 1) as f64;

		for _ in 0..self.iterations {
			let mut displacement = vec![(0.0f64, 0.0f64); n];

			for i in 0..n {
				for j in (i + 1)..n {
					let mut dx = positions[j].x - positions[i].x;
					let mut dy = positions[j].y - positions[i].y;
					if dx == 0.0 && dy == 0.0 {
						// Coincident points: treat j as lying on the +x side of i
						dx = MIN_DISTANCE;
						dy = 0.0;
					}
					let current = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
					let target = distances.get(i, j);

					let step = scale * (current - target) / current;
					displacement[i].0 += step * dx;
					displacement[i].1 += step * dy;
					displacement[j].0 -= step * dx;
					displacement[j].1 -= step * dy;
				}
			}

			for (p, (dx, dy)) in positions.iter_mut().zip(displacement) {
				p.x += dx;
				p.y += dy;
			}
		}

		positions
	}
}

impl Default for ForceDirected {
	fn default() -> Self {
		Self::new(FORCE_ITERATIONS, LEARNING_RATE, crate::config::DEFAULT_SEED)
	}
}

impl DimensionReducer for ForceDirected {
	fn reduce(&self, distances: &DistanceMatrix) -> Result<Vec<Point2>> {
		require_embeddable(distances)?;

		let mut rng = StdRng::seed_from_u64(self.seed);
		let start: Vec<Point2> = (0..distances.len())
			.map(|_| Point2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
			.collect();

		Ok(self.relax(distances, start))
	}

	fn name(&self) -> &'static str {
		"force-directed"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn coincident_targets_collapse_without_nan() {
		let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
		let dm = DistanceMatrix::from_raw(ids, ndarray::Array2::zeros((3, 3))).unwrap();
		let points = ForceDirected::default().reduce(&dm).unwrap();
		assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
		assert!(points[0].distance(&points[1]) < 0.01);
	}

	#[test]
	fn coincident_start_separates_to_target() {
		let ids = vec!["a".to_string(), "b".to_string()];
		let dm = DistanceMatrix::from_raw(ids, array![[0.0, 0.5], [0.5, 0.0]]).unwrap();
		let origin = Point2::new(0.0, 0.0);

		let points = ForceDirected::default().relax(&dm, vec![origin, origin]);
		assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
		assert!((points[0].distance(&points[1]) - 0.5).abs() < 1e-3);
		assert!(points[0].x < points[1].x);
	}

	#[test]
	fn seeded_runs_match() {
		let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
		let d = array![[0.0, 0.2, 0.9], [0.2, 0.0, 0.7], [0.9, 0.7, 0.0]];
		let dm = DistanceMatrix::from_raw(ids, d).unwrap();
		let reducer = ForceDirected::new(150, 0.1, 5);
		assert_eq!(reducer.reduce(&dm).unwrap(), reducer.reduce(&dm).unwrap());
	}
}
