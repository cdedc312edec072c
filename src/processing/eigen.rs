//! Leading eigenpairs of symmetric matrices

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::POWER_ITERATIONS;

const NULL_NORM: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
	pub value: f64,
	/// Unit-length eigenvector
	pub vector: Array1<f64>,
}

/// Extracts the `k` eigenpairs of largest magnitude from a symmetric matrix
///
/// MDS and PCA depend only on this trait, so a full linear-algebra backend
/// can replace power iteration without touching them.
pub trait EigenSolver {
	fn top_eigenpairs(&self, matrix: &Array2<f64>, k: usize) -> Vec<Eigenpair>;
}

/// Power iteration with deflation
///
/// Runs a fixed number of multiply-and-normalize steps per component; no
/// tolerance check. The starting vector comes from a seeded generator, one
/// draw per component, so equal seeds give equal results.
#[derive(Debug, Clone, Copy)]
pub struct PowerIteration {
	pub iterations: usize,
	pub seed: u64,
}

impl PowerIteration {
	pub fn new(iterations: usize, seed: u64) -> Self {
		Self { iterations, seed }
	}
}

impl Default for PowerIteration {
	fn default() -> Self {
		Self::new(POWER_ITERATIONS, crate::config::DEFAULT_SEED)
	}
}

impl EigenSolver for PowerIteration {
	fn top_eigenpairs(&self, matrix: &Array2<f64>, k: usize) -> Vec<Eigenpair> {
		let n = matrix.nrows();
		let mut rng = StdRng::seed_from_u64(self.seed);
		let mut work = matrix.clone();
		let mut pairs = Vec::with_capacity(k);

		for _ in 0..k.min(n) {
			let mut v = random_unit_vector(n, &mut rng);

			for _ in 0..self.iterations {
				let next = work.dot(&v);
				let norm = next.dot(&next).sqrt();
				if norm < NULL_NORM {
					// v lies in the null space of what is left
					break;
				}
				v = next.mapv(|x| x / norm);
			}

			let value = v.dot(&work.dot(&v));

			for i in 0..n {
				for j in 0..n {
					work[[i, j]] -= value * v[i] * v[j];
				}
			}

			pairs.push(Eigenpair { value, vector: v });
		}

		pairs
	}
}

fn random_unit_vector(n: usize, rng: &mut StdRng) -> Array1<f64> {
	let v: Array1<f64> = Array1::from_shape_fn(n, |_| rng.random_range(-1.0..1.0));
	let norm = v.dot(&v).sqrt();
	if norm < NULL_NORM {
		let mut e = Array1::zeros(n);
		if n > 0 {
			e[0] = 1.0;
		}
		return e;
	}
	v.mapv(|x| x / norm)
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	#[test]
	fn diagonal_matrix_eigenvalues() {
		let m = array![[5.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 0.5]];
		let pairs = PowerIteration::new(200, 7).top_eigenpairs(&m, 2);
		assert_eq!(pairs.len(), 2);
		assert!((pairs[0].value - 5.0).abs() < 1e-6);
		assert!((pairs[1].value - 2.0).abs() < 1e-6);
		assert!(pairs[0].vector[0].abs() > 0.999);
		assert!(pairs[1].vector[1].abs() > 0.999);
	}

	#[test]
	fn symmetric_matrix_known_spectrum() {
		// eigenvalues 3 and 1, eigenvectors (1,1)/sqrt2 and (1,-1)/sqrt2
		let m = array![[2.0, 1.0], [1.0, 2.0]];
		let pairs = PowerIteration::new(100, 1).top_eigenpairs(&m, 2);
		assert!((pairs[0].value - 3.0).abs() < 1e-6);
		assert!((pairs[1].value - 1.0).abs() < 1e-6);
		let v = &pairs[0].vector;
		assert!((v[0].abs() - v[1].abs()).abs() < 1e-6);
	}

	#[test]
	fn zero_matrix_yields_zero_eigenvalues() {
		let m = Array2::<f64>::zeros((3, 3));
		let pairs = PowerIteration::default().top_eigenpairs(&m, 2);
		assert!(pairs.iter().all(|p| p.value == 0.0));
	}

	#[test]
	fn random_start_is_unit_length() {
		let mut rng = StdRng::seed_from_u64(3);
		for n in [1, 2, 5, 40] {
			let v = random_unit_vector(n, &mut rng);
			assert_eq!(v.len(), n);
			assert!((v.dot(&v) - 1.0).abs() < 1e-12);
		}
		assert!(random_unit_vector(0, &mut rng).is_empty());
	}

	#[test]
	fn same_seed_same_result() {
		let m = array![[4.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 1.0]];
		let a = PowerIteration::new(50, 11).top_eigenpairs(&m, 2);
		let b = PowerIteration::new(50, 11).top_eigenpairs(&m, 2);
		assert_eq!(a, b);
	}
}
