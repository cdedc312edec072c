// Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scentmap::core::{Catalog, Intensity, Item, OracleError, Similarity};
use scentmap::oracle::{Judgment, SimilarityOracle};

/// A and B share category "x", C is alone in "y"
pub fn three_item_catalog() -> Catalog {
	Catalog::new(vec![
		Item::new("A", "x").with_notes(["rose", "musk"]),
		Item::new("B", "x").with_notes(["rose", "amber"]),
		Item::new("C", "y").with_notes(["pine", "smoke"]).with_intensity(Intensity::Heavy),
	])
	.unwrap()
}

pub fn oil_catalog() -> Catalog {
	Catalog::new(vec![
		Item::new("bergamot", "citrus")
			.with_notes(["fresh", "citrus", "floral"])
			.with_intensity(Intensity::Light),
		Item::new("lemon", "citrus")
			.with_notes(["fresh", "citrus", "zesty"])
			.with_intensity(Intensity::Light),
		Item::new("lavender", "floral")
			.with_notes(["floral", "herbal", "sweet"])
			.with_intensity(Intensity::Medium),
		Item::new("cedarwood", "woody")
			.with_notes(["woody", "dry", "warm"])
			.with_intensity(Intensity::Strong),
		Item::new("vetiver", "woody")
			.with_notes(["earthy", "smoky", "woody"])
			.with_intensity(Intensity::Heavy),
	])
	.unwrap()
}

/// Always errors
pub struct FailingOracle;

#[async_trait]
impl SimilarityOracle for FailingOracle {
	async fn similarity(&self, _a: &Item, _b: &Item) -> Result<Judgment, OracleError> {
		Err(OracleError::Unavailable("model offline".to_string()))
	}
}

/// Never answers within any reasonable timeout
pub struct SlowOracle;

#[async_trait]
impl SimilarityOracle for SlowOracle {
	async fn similarity(&self, _a: &Item, _b: &Item) -> Result<Judgment, OracleError> {
		tokio::time::sleep(Duration::from_secs(60)).await;
		Ok(Judgment::new(Similarity::MAX))
	}
}

/// Fixed score; counts how often it is asked
#[derive(Clone)]
pub struct CountingOracle {
	pub score: f64,
	pub calls: Arc<AtomicUsize>,
}

impl CountingOracle {
	pub fn new(score: f64) -> Self {
		Self {
			score,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SimilarityOracle for CountingOracle {
	async fn similarity(&self, _a: &Item, _b: &Item) -> Result<Judgment, OracleError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(Judgment::new(Similarity::new(self.score).unwrap()).with_explanation("counted"))
	}
}

/// Answers on a 0-100 scale, normalized at the boundary
pub struct PercentOracle;

#[async_trait]
impl SimilarityOracle for PercentOracle {
	async fn similarity(&self, a: &Item, b: &Item) -> Result<Judgment, OracleError> {
		let raw = if a.category == b.category { 90.0 } else { 20.0 };
		Similarity::from_percent(raw)
			.map(Judgment::new)
			.map_err(OracleError::Malformed)
	}
}
