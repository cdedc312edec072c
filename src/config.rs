//! Engine configuration and constants

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::Similarity;

// === Cache ===
pub const CACHE_FLUSH_EVERY: usize = 5;
pub const PAIR_KEY_SEPARATOR: char = '|';
pub const DEFAULT_CACHE_FILE: &str = "similarity_cache.json";

// === Similarity ===
pub const NEUTRAL_SIMILARITY: f64 = 0.5;
pub const FALLBACK_SAME_CATEGORY: f64 = 0.6;
pub const FALLBACK_DIFFERENT_CATEGORY: f64 = 0.3;

// === Oracle ===
pub const ORACLE_TIMEOUT_MS: u64 = 30_000;

// === Reducers ===
pub const POWER_ITERATIONS: usize = 100;
pub const FORCE_ITERATIONS: usize = 200;
pub const LEARNING_RATE: f64 = 0.1;
pub const MIN_DISTANCE: f64 = 0.001;
pub const DEFAULT_SEED: u64 = 42;

/// Deterministic similarity used when the oracle cannot answer for a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
	pub same_category: f64,
	pub different_category: f64,
}

impl Default for FallbackPolicy {
	fn default() -> Self {
		Self {
			same_category: FALLBACK_SAME_CATEGORY,
			different_category: FALLBACK_DIFFERENT_CATEGORY,
		}
	}
}

impl FallbackPolicy {
	/// Fallback score for a pair, depending only on whether categories match
	pub fn score(&self, category_a: &str, category_b: &str) -> Similarity {
		let value = if category_a.eq_ignore_ascii_case(category_b) {
			self.same_category
		} else {
			self.different_category
		};
		Similarity::clamped(value)
	}
}

/// Runtime settings for one engine instance
///
/// Passed explicitly to [`crate::engine::Engine`]; nothing here is global, so
/// two engines in the same process never share state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Persist the cache after this many new entries
	pub cache_flush_every: usize,
	/// Upper bound on a single oracle call
	pub oracle_timeout_ms: u64,
	/// Similarity assumed for pairs missing from a matrix
	pub missing_similarity: f64,
	pub fallback: FallbackPolicy,
	/// Ignore cached fallback entries and ask the oracle again
	pub retry_fallbacks: bool,
	pub power_iterations: usize,
	pub force_iterations: usize,
	pub learning_rate: f64,
	pub seed: u64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			cache_flush_every: CACHE_FLUSH_EVERY,
			oracle_timeout_ms: ORACLE_TIMEOUT_MS,
			missing_similarity: NEUTRAL_SIMILARITY,
			fallback: FallbackPolicy::default(),
			retry_fallbacks: false,
			power_iterations: POWER_ITERATIONS,
			force_iterations: FORCE_ITERATIONS,
			learning_rate: LEARNING_RATE,
			seed: DEFAULT_SEED,
		}
	}
}

impl EngineConfig {
	pub fn oracle_timeout(&self) -> Duration {
		Duration::from_millis(self.oracle_timeout_ms)
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_oracle_timeout(mut self, timeout: Duration) -> Self {
		self.oracle_timeout_ms = (timeout.as_millis() as u64).max(1);
		self
	}
}
