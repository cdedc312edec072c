//! Embed command - pairwise similarity through the oracle, then 2D layout

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colored::*;

use crate::config::EngineConfig;
use crate::core::EmbeddingSet;
use crate::engine::Engine;
use crate::oracle::HeuristicOracle;
use crate::processing::ReductionMethod;
use crate::storage::{load_catalog, SimilarityCache};
use crate::ui;

const PREVIEW_PAIRS: usize = 5;

pub struct EmbedOptions<'a> {
	pub catalog: &'a Path,
	pub output: &'a Path,
	pub cache: &'a Path,
	pub method: ReductionMethod,
	pub seed: u64,
	pub iterations: Option<usize>,
	pub timeout_ms: u64,
	pub flush_every: usize,
	pub retry_fallbacks: bool,
}

pub fn run(opts: EmbedOptions<'_>) -> Result<()> {
	let start = Instant::now();

	let catalog = load_catalog(opts.catalog)?;
	ui::success(&format!(
		"Loaded {} items from {}",
		catalog.len(),
		ui::path_link(opts.catalog)
	));

	let mut config = EngineConfig {
		cache_flush_every: opts.flush_every,
		retry_fallbacks: opts.retry_fallbacks,
		..EngineConfig::default()
	}
	.with_seed(opts.seed)
	.with_oracle_timeout(Duration::from_millis(opts.timeout_ms));

	if let Some(n) = opts.iterations {
		match opts.method {
			ReductionMethod::Mds => config.power_iterations = n,
			ReductionMethod::ForceDirected => config.force_iterations = n,
		}
	}

	let cache = SimilarityCache::open(opts.cache, config.cache_flush_every);
	ui::debug(&format!("Cache holds {} similarities", cache.len()));

	let mut engine = Engine::new(HeuristicOracle::new(), cache, config);

	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_time()
		.build()
		.context("Failed to start async runtime")?;
	let embeddings = runtime.block_on(engine.embed(&catalog, opts.method))?;

	print_preview(&embeddings);
	embeddings.save_json(opts.output)?;

	if opts.output.to_str() != Some("-") {
		ui::success(&format!("Saved embeddings to {}", ui::path_link(opts.output)));
	}
	ui::debug(&format!("Completed in {:.1}s", start.elapsed().as_secs_f32()));

	Ok(())
}

/// Most similar pairs, for a quick sanity check of the run
fn print_preview(set: &EmbeddingSet) {
	let Some(matrix) = &set.similarity_matrix else {
		return;
	};

	let mut pairs: Vec<(&str, &str, f64)> = matrix
		.iter()
		.flat_map(|(a, row)| {
			row.iter()
				.filter(move |(b, _)| a.as_str() < b.as_str())
				.map(move |(b, &s)| (a.as_str(), b.as_str(), s))
		})
		.collect();
	pairs.sort_by(|x, y| y.2.partial_cmp(&x.2).unwrap_or(std::cmp::Ordering::Equal));

	ui::header("Closest pairs");
	for (i, (a, b, score)) in pairs.iter().take(PREVIEW_PAIRS).enumerate() {
		let distance = set.distance(a, b).unwrap_or(0.0);
		eprintln!(
			"  {} {} {} {} {}",
			format!("{}.", i + 1).bright_blue().bold(),
			a.bright_white(),
			"~".dimmed(),
			b.bright_white(),
			format!("{} (d={:.3})", ui::score_color(*score), distance).dimmed()
		);
	}
}
