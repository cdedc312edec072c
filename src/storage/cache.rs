//! Persistent cache of pairwise similarity judgments

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CACHE_FLUSH_EVERY;
use crate::core::{PairKey, Similarity};
use crate::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where a cached score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
	#[default]
	Oracle,
	Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
	pub similarity: Similarity,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub explanation: Option<String>,
	#[serde(default)]
	pub source: ScoreSource,
	pub timestamp: DateTime<Utc>,
}

/// Serialized form of the whole cache
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheFile {
	version: String,
	generated_at: DateTime<Utc>,
	entries: BTreeMap<PairKey, CacheEntry>,
}

/// Storage encoding, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFormat {
	Json,
	MessagePack,
}

impl CacheFormat {
	pub fn detect(path: &Path) -> Self {
		match path.extension().and_then(|e| e.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("json") => CacheFormat::Json,
			_ => CacheFormat::MessagePack,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
	pub total: usize,
	pub from_oracle: usize,
	pub from_fallback: usize,
	pub pending: usize,
}

/// Similarity cache keyed by unordered item pair
///
/// Loaded once, written back every `flush_every` new entries and on demand.
/// A missing or unreadable file yields an empty cache; it is never fatal.
#[derive(Debug)]
pub struct SimilarityCache {
	path: Option<PathBuf>,
	entries: BTreeMap<PairKey, CacheEntry>,
	flush_every: usize,
	pending: usize,
	generated_at: DateTime<Utc>,
}

impl Default for SimilarityCache {
	fn default() -> Self {
		Self::in_memory()
	}
}

impl SimilarityCache {
	/// Cache with no backing file
	pub fn in_memory() -> Self {
		Self {
			path: None,
			entries: BTreeMap::new(),
			flush_every: CACHE_FLUSH_EVERY,
			pending: 0,
			generated_at: Utc::now(),
		}
	}

	/// Opens a file-backed cache, starting empty if the file is absent or corrupt
	pub fn open(path: impl Into<PathBuf>, flush_every: usize) -> Self {
		let path = path.into();
		let mut cache = Self::in_memory();
		cache.flush_every = flush_every.max(1);

		if path.exists() {
			match read_cache_file(&path) {
				Ok(file) => {
					ui::debug(&format!(
						"Loaded {} cached similarities from {}",
						file.entries.len(),
						path.display()
					));
					cache.entries = file.entries;
					cache.generated_at = file.generated_at;
				}
				Err(e) => {
					ui::warn(&format!(
						"Ignoring unreadable cache {}: {:#}",
						path.display(),
						e
					));
				}
			}
		} else {
			ui::debug(&format!("No cache at {}, starting empty", path.display()));
		}

		cache.path = Some(path);
		cache
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Cached score for a pair; self-pairs always score the maximum
	pub fn lookup(&self, a: &str, b: &str) -> Option<Similarity> {
		if a == b {
			return Some(Similarity::MAX);
		}
		self.entry(a, b).map(|e| e.similarity)
	}

	pub fn entry(&self, a: &str, b: &str) -> Option<&CacheEntry> {
		self.entries.get(&PairKey::new(a, b))
	}

	/// Records a score, flushing once enough new entries have accumulated
	///
	/// Existing oracle entries are kept as they are. A fallback entry may be
	/// superseded by a later oracle answer for the same pair.
	pub fn store(
		&mut self,
		a: &str,
		b: &str,
		similarity: Similarity,
		explanation: Option<String>,
		source: ScoreSource,
	) -> Result<()> {
		if a == b {
			return Ok(());
		}

		let key = PairKey::new(a, b);
		if let Some(existing) = self.entries.get(&key) {
			let upgrade = existing.source == ScoreSource::Fallback && source == ScoreSource::Oracle;
			if !upgrade {
				return Ok(());
			}
		}

		self.entries.insert(
			key,
			CacheEntry {
				similarity,
				explanation,
				source,
				timestamp: Utc::now(),
			},
		);
		self.pending += 1;

		if self.pending >= self.flush_every {
			self.flush()?;
		}
		Ok(())
	}

	/// Writes every entry to the backing file, if any
	pub fn flush(&mut self) -> Result<()> {
		let Some(path) = self.path.clone() else {
			self.pending = 0;
			return Ok(());
		};

		self.generated_at = Utc::now();
		let file = CacheFile {
			version: VERSION.to_string(),
			generated_at: self.generated_at,
			entries: self.entries.clone(),
		};
		write_cache_file(&path, &file)?;

		ui::debug(&format!(
			"Flushed {} similarities to {}",
			self.entries.len(),
			path.display()
		));
		self.pending = 0;
		Ok(())
	}

	/// Drops every entry and persists the empty cache
	pub fn clear(&mut self) -> Result<()> {
		self.entries.clear();
		self.flush()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn flush_every(&self) -> usize {
		self.flush_every
	}

	/// Changes how many new entries trigger a write; takes effect on the next store
	pub fn set_flush_every(&mut self, flush_every: usize) {
		self.flush_every = flush_every.max(1);
	}

	/// Entries stored since the last flush
	pub fn pending(&self) -> usize {
		self.pending
	}

	pub fn generated_at(&self) -> DateTime<Utc> {
		self.generated_at
	}

	pub fn stats(&self) -> CacheStats {
		let from_fallback = self
			.entries
			.values()
			.filter(|e| e.source == ScoreSource::Fallback)
			.count();
		CacheStats {
			total: self.entries.len(),
			from_oracle: self.entries.len() - from_fallback,
			from_fallback,
			pending: self.pending,
		}
	}
}

fn read_cache_file(path: &Path) -> Result<CacheFile> {
	let bytes = fs::read(path).context("Failed to read cache")?;
	match CacheFormat::detect(path) {
		CacheFormat::Json => serde_json::from_slice(&bytes).context("Failed to parse cache JSON"),
		CacheFormat::MessagePack => {
			rmp_serde::from_slice(&bytes).context("Failed to deserialize cache")
		}
	}
}

fn write_cache_file(path: &Path, file: &CacheFile) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).context("Failed to create cache directory")?;
	}

	let bytes = match CacheFormat::detect(path) {
		CacheFormat::Json => {
			serde_json::to_vec_pretty(file).context("Failed to serialize cache JSON")?
		}
		CacheFormat::MessagePack => {
			rmp_serde::to_vec_named(file).context("Failed to serialize cache")?
		}
	};

	// Write beside the target and rename so readers never see a partial file
	let mut tmp = path.as_os_str().to_owned();
	tmp.push(".tmp");
	let tmp = PathBuf::from(tmp);
	fs::write(&tmp, bytes).context("Failed to write cache")?;
	fs::rename(&tmp, path).context("Failed to replace cache file")?;
	Ok(())
}
