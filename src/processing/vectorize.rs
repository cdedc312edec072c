//! TF-IDF feature vectors over the catalog's note vocabulary

use std::collections::{BTreeMap, BTreeSet, HashSet};

use anyhow::Result;

use crate::core::Catalog;
use crate::ui;

/// Distinct descriptor tokens with a stable index each
///
/// Tokens are ordered lexicographically, so the axis order only depends on
/// the set of tokens, not on item order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
	tokens: Vec<String>,
	index: BTreeMap<String, usize>,
}

impl Vocabulary {
	pub fn build(catalog: &Catalog) -> Self {
		let tokens: BTreeSet<&str> = catalog
			.items()
			.iter()
			.flat_map(|item| item.notes.iter().map(String::as_str))
			.collect();

		let tokens: Vec<String> = tokens.into_iter().map(str::to_string).collect();
		let index = tokens
			.iter()
			.enumerate()
			.map(|(i, t)| (t.clone(), i))
			.collect();

		Self { tokens, index }
	}

	pub fn index_of(&self, token: &str) -> Option<usize> {
		self.index.get(token).copied()
	}

	pub fn token(&self, index: usize) -> Option<&str> {
		self.tokens.get(index).map(String::as_str)
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

/// Dense weight vector, one entry per vocabulary token
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}

	pub fn get(&self, index: usize) -> f64 {
		self.0.get(index).copied().unwrap_or(0.0)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn norm(&self) -> f64 {
		self.0.iter().map(|x| x * x).sum::<f64>().sqrt()
	}

	/// Cosine similarity in [0.0, 1.0]; zero vectors score 0
	pub fn cosine(&self, other: &Self) -> f64 {
		let denom = self.norm() * other.norm();
		if denom == 0.0 {
			return 0.0;
		}
		let dot: f64 = self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum();
		(dot / denom).clamp(0.0, 1.0)
	}
}

/// Vocabulary plus one feature vector per item, in catalog order
#[derive(Debug, Clone)]
pub struct FeatureSet {
	pub vocabulary: Vocabulary,
	pub ids: Vec<String>,
	pub vectors: Vec<FeatureVector>,
}

impl FeatureSet {
	pub fn vector(&self, id: &str) -> Option<&FeatureVector> {
		self.ids.iter().position(|i| i == id).map(|idx| &self.vectors[idx])
	}

	/// Weight of `token` in item `id`, or `None` if either is unknown
	pub fn weight(&self, id: &str, token: &str) -> Option<f64> {
		let column = self.vocabulary.index_of(token)?;
		self.vector(id).map(|v| v.get(column))
	}
}

/// Weights every item's notes by length-normalized TF times IDF
///
/// weight = (1 / notes in item) * ln(items / items containing token).
/// Document frequency counts items, not occurrences, so a token present in
/// every item gets weight 0.
pub fn vectorize(catalog: &Catalog) -> Result<FeatureSet> {
	if catalog.is_empty() {
		anyhow::bail!("Cannot vectorize an empty catalog");
	}

	let vocabulary = Vocabulary::build(catalog);
	let n_items = catalog.len() as f64;

	let mut document_frequency = vec![0usize; vocabulary.len()];
	for item in catalog.items() {
		let unique: HashSet<&str> = item.notes.iter().map(String::as_str).collect();
		for token in unique {
			if let Some(idx) = vocabulary.index_of(token) {
				document_frequency[idx] += 1;
			}
		}
	}

	let idf: Vec<f64> = document_frequency
		.iter()
		.map(|&df| if df > 0 { (n_items / df as f64).ln() } else { 0.0 })
		.collect();

	let vectors = catalog
		.items()
		.iter()
		.map(|item| {
			let mut weights = vec![0.0; vocabulary.len()];
			if !item.notes.is_empty() {
				let tf = 1.0 / item.notes.len() as f64;
				for token in &item.notes {
					if let Some(idx) = vocabulary.index_of(token) {
						weights[idx] = tf * idf[idx];
					}
				}
			}
			FeatureVector(weights)
		})
		.collect();

	ui::debug(&format!(
		"Vectorized {} items over {} tokens",
		catalog.len(),
		vocabulary.len()
	));

	Ok(FeatureSet {
		vocabulary,
		ids: catalog.ids().map(str::to_string).collect(),
		vectors,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::Item;

	#[test]
	fn vocabulary_is_sorted_union() {
		let catalog = Catalog::new(vec![
			Item::new("a", "x").with_notes(["rose", "amber"]),
			Item::new("b", "x").with_notes(["amber", "musk"]),
		])
		.unwrap();
		let vocab = Vocabulary::build(&catalog);
		assert_eq!(vocab.tokens(), &["amber", "musk", "rose"]);
		assert_eq!(vocab.index_of("musk"), Some(1));
	}

	#[test]
	fn weight_uses_item_length() {
		let catalog = Catalog::new(vec![
			Item::new("a", "x").with_notes(["rose", "amber"]),
			Item::new("b", "x").with_notes(["musk"]),
		])
		.unwrap();
		let features = vectorize(&catalog).unwrap();
		let expected = 0.5 * (2.0f64).ln();
		assert!((features.weight("a", "rose").unwrap() - expected).abs() < 1e-12);
		assert!((features.weight("b", "musk").unwrap() - (2.0f64).ln()).abs() < 1e-12);
		assert_eq!(features.weight("b", "rose"), Some(0.0));
	}
}
