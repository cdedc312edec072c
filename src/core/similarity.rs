//! Bounded similarity scores and pairwise similarity matrices

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PAIR_KEY_SEPARATOR;

/// Similarity score on the [0.0, 1.0] scale
///
/// Every oracle result is normalized to this convention before it reaches the
/// cache or the distance builder.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Similarity(f64);

impl Similarity {
	pub const MIN: Similarity = Similarity(0.0);
	pub const MAX: Similarity = Similarity(1.0);

	/// Creates a score, returning error if out of range or not finite
	pub fn new(value: f64) -> Result<Self, String> {
		if value.is_finite() && (0.0..=1.0).contains(&value) {
			Ok(Self(value))
		} else {
			Err(format!("similarity must be [0.0, 1.0], got {}", value))
		}
	}

	/// Clamps into range; NaN maps to the minimum
	pub fn clamped(value: f64) -> Self {
		if value.is_nan() {
			Self::MIN
		} else {
			Self(value.clamp(0.0, 1.0))
		}
	}

	/// Normalizes a score given on a 0-100 scale
	pub fn from_percent(value: f64) -> Result<Self, String> {
		if value.is_finite() && (0.0..=100.0).contains(&value) {
			Ok(Self(value / 100.0))
		} else {
			Err(format!("percent similarity must be [0, 100], got {}", value))
		}
	}

	pub fn value(self) -> f64 {
		self.0
	}
}

impl TryFrom<f64> for Similarity {
	type Error = String;

	fn try_from(value: f64) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl From<Similarity> for f64 {
	fn from(s: Similarity) -> f64 {
		s.0
	}
}

impl fmt::Display for Similarity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:.3}", self.0)
	}
}

/// Canonical key for an unordered pair of identifiers
///
/// The two identifiers are sorted before joining, so `(a, b)` and `(b, a)`
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(String);

impl PairKey {
	pub fn new(a: &str, b: &str) -> Self {
		let (first, second) = if a <= b { (a, b) } else { (b, a) };
		Self(format!("{}{}{}", first, PAIR_KEY_SEPARATOR, second))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PairKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Symmetric similarity judgments among an ordered set of items
///
/// Self-similarity is always [`Similarity::MAX`] and is never stored.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
	ids: Vec<String>,
	scores: HashMap<PairKey, Similarity>,
}

impl SimilarityMatrix {
	pub fn new(ids: Vec<String>) -> Self {
		Self {
			ids,
			scores: HashMap::new(),
		}
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

	/// Records a score for the unordered pair; self-pairs are ignored
	pub fn set(&mut self, a: &str, b: &str, score: Similarity) {
		if a == b {
			return;
		}
		self.scores.insert(PairKey::new(a, b), score);
	}

	/// Score for a pair, `None` when the pair was never judged
	pub fn get(&self, a: &str, b: &str) -> Option<Similarity> {
		if a == b {
			return Some(Similarity::MAX);
		}
		self.scores.get(&PairKey::new(a, b)).copied()
	}

	/// Score by position, substituting `missing` for unjudged pairs
	pub fn get_or(&self, i: usize, j: usize, missing: Similarity) -> Similarity {
		self.get(&self.ids[i], &self.ids[j]).unwrap_or(missing)
	}

	/// Number of distinct judged pairs
	pub fn judged_pairs(&self) -> usize {
		self.scores.len()
	}
}
