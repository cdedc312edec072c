//! Catalog file loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::Catalog;

/// Load a catalog from a JSON file keyed by item identifier
pub fn load_catalog(path: &Path) -> Result<Catalog> {
	let json = fs::read_to_string(path)
		.with_context(|| format!("Failed to read catalog {}", path.display()))?;
	let catalog = Catalog::from_json(&json)
		.with_context(|| format!("Failed to parse catalog {}", path.display()))?;

	if catalog.is_empty() {
		anyhow::bail!("Catalog {} contains no items", path.display());
	}

	Ok(catalog)
}
