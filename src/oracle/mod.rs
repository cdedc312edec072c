//! # Similarity Oracles
//!
//! Anything that can judge how alike two items are. The engine only sees the
//! [`SimilarityOracle`] trait, so an oracle may be a pure function of the
//! catalog, an in-process model, an RPC client or a subprocess wrapper.

pub mod heuristic;

use async_trait::async_trait;

use crate::core::{Item, OracleError, Similarity};

pub use crate::config::FallbackPolicy;
pub use heuristic::HeuristicOracle;

/// One pairwise answer from an oracle
#[derive(Debug, Clone, PartialEq)]
pub struct Judgment {
	pub similarity: Similarity,
	pub explanation: Option<String>,
}

impl Judgment {
	pub fn new(similarity: Similarity) -> Self {
		Self {
			similarity,
			explanation: None,
		}
	}

	pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
		self.explanation = Some(explanation.into());
		self
	}
}

/// Source of pairwise similarity judgments
///
/// Implementations must return scores already normalized to [0.0, 1.0]
/// (see [`Similarity::from_percent`] for 0-100 sources). Calls may be slow or
/// fail; the engine bounds each call with a timeout and falls back on error.
#[async_trait]
pub trait SimilarityOracle: Send + Sync {
	async fn similarity(&self, a: &Item, b: &Item) -> Result<Judgment, OracleError>;

	/// Short label for logs
	fn name(&self) -> &str {
		"oracle"
	}
}
