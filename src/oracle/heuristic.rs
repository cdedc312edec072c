//! Rule-based oracle computed from catalog attributes

use std::collections::HashSet;

use async_trait::async_trait;

use super::{Judgment, SimilarityOracle};
use crate::core::{Intensity, Item, OracleError, Similarity};

const NOTES_WEIGHT: f64 = 0.5;
const CATEGORY_WEIGHT: f64 = 0.3;
const INTENSITY_WEIGHT: f64 = 0.2;

/// Scores pairs by shared notes, matching category and intensity closeness
///
/// Never fails, which makes it a useful default when no external reasoning
/// service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOracle;

impl HeuristicOracle {
	pub fn new() -> Self {
		Self
	}

	pub fn judge(&self, a: &Item, b: &Item) -> Judgment {
		let notes_a: HashSet<String> = a.notes.iter().map(|n| n.to_lowercase()).collect();
		let notes_b: HashSet<String> = b.notes.iter().map(|n| n.to_lowercase()).collect();

		let shared = notes_a.intersection(&notes_b).count();
		let union = notes_a.union(&notes_b).count();
		let jaccard = if union > 0 {
			shared as f64 / union as f64
		} else {
			0.0
		};

		let same_category = a.category.eq_ignore_ascii_case(&b.category);
		let closeness = intensity_closeness(a.intensity, b.intensity);

		let score = NOTES_WEIGHT * jaccard
			+ CATEGORY_WEIGHT * if same_category { 1.0 } else { 0.0 }
			+ INTENSITY_WEIGHT * closeness;

		let mut reasons = vec![format!("{} shared notes", shared)];
		if same_category {
			reasons.push(format!("both {}", a.category));
		}
		if a.intensity == b.intensity {
			reasons.push(format!("both {} intensity", a.intensity));
		}

		Judgment::new(Similarity::clamped(score)).with_explanation(reasons.join(", "))
	}
}

/// 1.0 for equal intensities, 0.0 for light vs heavy
fn intensity_closeness(a: Intensity, b: Intensity) -> f64 {
	let gap = a.rank().abs_diff(b.rank()) as f64;
	1.0 - gap / Intensity::MAX_RANK as f64
}

#[async_trait]
impl SimilarityOracle for HeuristicOracle {
	async fn similarity(&self, a: &Item, b: &Item) -> Result<Judgment, OracleError> {
		Ok(self.judge(a, b))
	}

	fn name(&self) -> &str {
		"heuristic"
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_attributes_score_max() {
		let a = Item::new("lavender", "floral").with_notes(["sweet", "herbal"]);
		let b = Item::new("lavandin", "floral").with_notes(["herbal", "sweet"]);
		let judgment = HeuristicOracle.judge(&a, &b);
		assert!((judgment.similarity.value() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn shared_notes_raise_score() {
		let base = Item::new("a", "citrus").with_notes(["fresh", "zesty"]);
		let close = Item::new("b", "woody").with_notes(["fresh", "zesty"]);
		let far = Item::new("c", "woody").with_notes(["smoky"]);
		let oracle = HeuristicOracle;
		assert!(oracle.judge(&base, &close).similarity > oracle.judge(&base, &far).similarity);
	}

	#[test]
	fn symmetric() {
		let a = Item::new("a", "citrus").with_notes(["fresh"]).with_intensity(Intensity::Light);
		let b = Item::new("b", "spice").with_notes(["warm", "fresh"]).with_intensity(Intensity::Heavy);
		let oracle = HeuristicOracle;
		assert_eq!(oracle.judge(&a, &b).similarity, oracle.judge(&b, &a).similarity);
	}
}
