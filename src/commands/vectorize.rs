//! Vectorize command - TF-IDF note vectors to 2D, no oracle involved

use std::path::Path;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::engine::{embed_features, FeatureLayout};
use crate::processing::vectorize;
use crate::storage::load_catalog;
use crate::ui;

pub fn run(catalog_path: &Path, output: &Path, layout: FeatureLayout, seed: u64) -> Result<()> {
	let catalog = load_catalog(catalog_path)?;

	let features = vectorize(&catalog)?;
	ui::info(&format!(
		"{} items over {} distinct notes",
		catalog.len(),
		features.vocabulary.len()
	));

	let config = EngineConfig::default().with_seed(seed);
	ui::debug(&format!("Layout: {:?}", layout));
	let embeddings = embed_features(&catalog, &config, layout)?;

	embeddings.save_json(output)?;
	if output.to_str() != Some("-") {
		ui::success(&format!("Saved embeddings to {}", ui::path_link(output)));
	}
	Ok(())
}
