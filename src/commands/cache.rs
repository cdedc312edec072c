//! Cache command - inspect or clear persisted similarities

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use colored::*;

use crate::config::CACHE_FLUSH_EVERY;
use crate::storage::{CacheFormat, SimilarityCache};
use crate::ui;

pub fn stats(path: &Path) -> Result<()> {
	if !path.exists() {
		ui::warn(&format!("No cache at {}", path.display()));
		return Ok(());
	}

	let cache = SimilarityCache::open(path, CACHE_FLUSH_EVERY);
	let stats = cache.stats();

	ui::header("Similarity cache");
	eprintln!("  {} {}", "File:".bright_blue(), ui::path_link(path));
	eprintln!("  {} {:?}", "Format:".bright_blue(), CacheFormat::detect(path));
	eprintln!("  {} {}", "Entries:".bright_blue(), stats.total);
	eprintln!("  {} {}", "From oracle:".bright_blue(), stats.from_oracle);
	if stats.from_fallback > 0 {
		eprintln!("  {} {}", "From fallback:".yellow(), stats.from_fallback);
	}
	eprintln!(
		"  {} {}",
		"Written:".bright_blue(),
		cache.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
	);
	Ok(())
}

pub fn clear(path: &Path, auto_confirm: bool) -> Result<()> {
	if !path.exists() {
		ui::info("Nothing to clear");
		return Ok(());
	}

	let mut cache = SimilarityCache::open(path, CACHE_FLUSH_EVERY);
	if cache.is_empty() {
		ui::info("Cache is already empty");
		return Ok(());
	}

	if !auto_confirm {
		eprint!("Delete {} cached similarities? [y/N]: ", cache.len());
		io::stderr().flush()?;

		let mut input = String::new();
		io::stdin().read_line(&mut input)?;

		if !input.trim().eq_ignore_ascii_case("y") {
			ui::info("Cancelled");
			return Ok(());
		}
	}

	let removed = cache.len();
	cache.clear()?;
	ui::success(&format!("Cleared {} cached similarities", removed));
	Ok(())
}
