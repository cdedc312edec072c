//! Similarity-to-embedding engine
//!
//! Collects pairwise judgments through an injected oracle and cache, then
//! lays the catalog out in 2D. Oracle trouble never aborts a run: timeouts
//! and errors fall back to a deterministic category score.

use std::time::Instant;

use anyhow::Result;
use chrono::Utc;

use crate::config::EngineConfig;
use crate::core::{Catalog, EmbeddingSet, Item, OracleError, Similarity, SimilarityMatrix};
use crate::oracle::{Judgment, SimilarityOracle};
use crate::processing::{
	assemble, pca, vectorize, DistanceMatrix, FeatureSet, PowerIteration, ReductionMethod,
};
use crate::storage::{ScoreSource, SimilarityCache};
use crate::ui;

/// How a pair's score was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
	SelfPair,
	Cached,
	Oracle,
	Fallback,
}

/// Counters from one matrix generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
	pub pairs: usize,
	pub cache_hits: usize,
	pub oracle_calls: usize,
	pub fallbacks: usize,
}

/// Engine instance owning its oracle, cache and settings
pub struct Engine<O> {
	oracle: O,
	cache: SimilarityCache,
	config: EngineConfig,
}

impl<O: SimilarityOracle> Engine<O> {
	/// The cache's flush interval is taken from `config.cache_flush_every`
	pub fn new(oracle: O, mut cache: SimilarityCache, config: EngineConfig) -> Self {
		cache.set_flush_every(config.cache_flush_every);
		Self {
			oracle,
			cache,
			config,
		}
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn cache(&self) -> &SimilarityCache {
		&self.cache
	}

	pub fn into_cache(self) -> SimilarityCache {
		self.cache
	}

	/// Score for one pair: cache first, then the oracle, then the fallback
	pub async fn similarity(&mut self, a: &Item, b: &Item) -> (Similarity, PairOutcome) {
		if a.id == b.id {
			return (Similarity::MAX, PairOutcome::SelfPair);
		}

		if let Some(entry) = self.cache.entry(&a.id, &b.id) {
			let stale = self.config.retry_fallbacks && entry.source == ScoreSource::Fallback;
			if !stale {
				return (entry.similarity, PairOutcome::Cached);
			}
		}

		let (judgment, source) = match self.ask_oracle(a, b).await {
			Ok(judgment) => (judgment, ScoreSource::Oracle),
			Err(e) => {
				ui::warn(&format!(
					"{} failed for {} / {}: {}, using fallback",
					self.oracle.name(),
					a.id,
					b.id,
					e
				));
				let score = self.config.fallback.score(&a.category, &b.category);
				let judgment = Judgment::new(score).with_explanation(format!("fallback: {}", e));
				(judgment, ScoreSource::Fallback)
			}
		};

		if let Err(e) = self.cache.store(
			&a.id,
			&b.id,
			judgment.similarity,
			judgment.explanation,
			source,
		) {
			ui::warn(&format!("Failed to persist similarity cache: {:#}", e));
		}

		let outcome = match source {
			ScoreSource::Oracle => PairOutcome::Oracle,
			ScoreSource::Fallback => PairOutcome::Fallback,
		};
		(judgment.similarity, outcome)
	}

	async fn ask_oracle(&self, a: &Item, b: &Item) -> Result<Judgment, OracleError> {
		let timeout = self.config.oracle_timeout();
		match tokio::time::timeout(timeout, self.oracle.similarity(a, b)).await {
			Ok(result) => result,
			Err(_) => Err(OracleError::Timeout(timeout.as_millis() as u64)),
		}
	}

	/// Judges every unordered pair in the catalog, one oracle call at a time
	///
	/// The cache is flushed at the end regardless of the periodic flushes.
	pub async fn generate_matrix(
		&mut self,
		catalog: &Catalog,
	) -> Result<(SimilarityMatrix, GenerationReport)> {
		let start = Instant::now();
		let ids: Vec<String> = catalog.ids().map(str::to_string).collect();
		let mut matrix = SimilarityMatrix::new(ids);
		let mut report = GenerationReport::default();

		let total = catalog.len() * catalog.len().saturating_sub(1) / 2;
		ui::info(&format!(
			"Comparing {} items ({} pairs) with {}",
			catalog.len(),
			total,
			self.oracle.name()
		));

		for (a, b) in catalog.pairs() {
			let (score, outcome) = self.similarity(a, b).await;
			matrix.set(&a.id, &b.id, score);

			report.pairs += 1;
			match outcome {
				PairOutcome::Cached => report.cache_hits += 1,
				PairOutcome::Oracle => report.oracle_calls += 1,
				PairOutcome::Fallback => report.fallbacks += 1,
				PairOutcome::SelfPair => {}
			}

			ui::debug(&format!(
				"[{}/{}] {} / {} = {} ({:?})",
				report.pairs, total, a.id, b.id, score, outcome
			));
		}

		if let Err(e) = self.cache.flush() {
			ui::warn(&format!("Failed to persist similarity cache: {:#}", e));
		}

		ui::success(&format!(
			"Matrix ready in {:.1}s: {} cached, {} asked, {} fallback",
			start.elapsed().as_secs_f32(),
			report.cache_hits,
			report.oracle_calls,
			report.fallbacks
		));

		Ok((matrix, report))
	}

	/// Full run: pairwise judgments, distances, reduction, assembly
	pub async fn embed(&mut self, catalog: &Catalog, method: ReductionMethod) -> Result<EmbeddingSet> {
		if catalog.len() < 2 {
			anyhow::bail!("Need at least 2 items to embed, got {}", catalog.len());
		}

		let (matrix, report) = self.generate_matrix(catalog).await?;
		let missing = Similarity::clamped(self.config.missing_similarity);
		let distances = DistanceMatrix::from_similarities(&matrix, missing);

		let reducer = method.reducer(&self.config);
		ui::debug(&format!("Reducing with {}", reducer.name()));
		let points = reducer.reduce(&distances)?;

		assemble(
			catalog,
			distances.ids(),
			&points,
			Some(&matrix),
			report.pairs,
			Utc::now(),
		)
	}
}

/// How the oracle-free feature path lays items out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureLayout {
	/// Direct projection onto the top two principal axes
	#[default]
	Pca,
	/// Cosine distances fed to one of the distance reducers
	Distances(ReductionMethod),
}

/// Embeds a catalog from its TF-IDF note vectors alone, without an oracle
pub fn embed_features(
	catalog: &Catalog,
	config: &EngineConfig,
	layout: FeatureLayout,
) -> Result<EmbeddingSet> {
	let features = vectorize(catalog)?;
	if features.ids.len() < 2 {
		anyhow::bail!("Need at least 2 items to embed, got {}", features.ids.len());
	}

	let points = match layout {
		FeatureLayout::Pca => {
			let solver = PowerIteration::new(config.power_iterations, config.seed);
			pca::project(&features, &solver)?
		}
		FeatureLayout::Distances(method) => {
			let distances = DistanceMatrix::from_features(&features);
			method.reducer(config).reduce(&distances)?
		}
	};

	let matrix = cosine_matrix(&features);
	let comparisons = matrix.judged_pairs();
	assemble(catalog, &features.ids, &points, Some(&matrix), comparisons, Utc::now())
}

fn cosine_matrix(features: &FeatureSet) -> SimilarityMatrix {
	let mut matrix = SimilarityMatrix::new(features.ids.clone());
	for i in 0..features.ids.len() {
		for j in (i + 1)..features.ids.len() {
			let s = features.vectors[i].cosine(&features.vectors[j]);
			matrix.set(&features.ids[i], &features.ids[j], Similarity::clamped(s));
		}
	}
	matrix
}
