//! 2D coordinates and the embedding record set handed to renderers

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Intensity;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
	pub x: f64,
	pub y: f64,
}

impl Point2 {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(&self, other: &Self) -> f64 {
		((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
	}
}

/// One item's position plus a denormalized copy of its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedItem {
	pub x: f64,
	pub y: f64,
	pub category: String,
	pub intensity: Intensity,
	pub description: String,
	pub notes: Vec<String>,
}

impl EmbeddedItem {
	pub fn point(&self) -> Point2 {
		Point2::new(self.x, self.y)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingMetadata {
	pub total_items: usize,
	pub total_comparisons: usize,
	pub generated_at: DateTime<Utc>,
}

/// Complete output of one run, regenerated wholesale each time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingSet {
	pub embeddings: BTreeMap<String, EmbeddedItem>,
	pub metadata: EmbeddingMetadata,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub similarity_matrix: Option<BTreeMap<String, BTreeMap<String, f64>>>,
}

impl EmbeddingSet {
	pub fn get(&self, id: &str) -> Option<&EmbeddedItem> {
		self.embeddings.get(id)
	}

	/// Euclidean distance between two embedded items
	pub fn distance(&self, a: &str, b: &str) -> Option<f64> {
		let a = self.embeddings.get(a)?;
		let b = self.embeddings.get(b)?;
		Some(a.point().distance(&b.point()))
	}

	pub fn to_json(&self) -> Result<String> {
		serde_json::to_string_pretty(self).context("Failed to serialize embeddings")
	}

	/// Write to a JSON file, or stdout when the path is "-"
	pub fn save_json(&self, path: &Path) -> Result<()> {
		let json = self.to_json()?;
		if path.to_str() == Some("-") || path.as_os_str().is_empty() {
			println!("{}", json);
			return Ok(());
		}
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).context("Failed to create output directory")?;
		}
		fs::write(path, json).context("Failed to write embeddings file")
	}
}
