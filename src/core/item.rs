//! Catalog items and their descriptive attributes

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Ordinal strength of an item's aroma
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
	Light,
	#[default]
	Medium,
	Strong,
	Heavy,
}

impl Intensity {
	/// Position on the light..heavy scale (0..=3)
	pub fn rank(self) -> u8 {
		match self {
			Intensity::Light => 0,
			Intensity::Medium => 1,
			Intensity::Strong => 2,
			Intensity::Heavy => 3,
		}
	}

	pub const MAX_RANK: u8 = 3;
}

impl fmt::Display for Intensity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Intensity::Light => "light",
			Intensity::Medium => "medium",
			Intensity::Strong => "strong",
			Intensity::Heavy => "heavy",
		};
		f.write_str(name)
	}
}

/// A single catalog entry
///
/// `notes` are the descriptor tokens used for vectorization and heuristic
/// similarity. Items are read-only once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
	pub id: String,
	pub notes: Vec<String>,
	pub category: String,
	#[serde(default)]
	pub intensity: Intensity,
	#[serde(default)]
	pub description: String,
}

impl Item {
	pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			notes: Vec::new(),
			category: category.into(),
			intensity: Intensity::default(),
			description: String::new(),
		}
	}

	pub fn with_notes<I, S>(mut self, notes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.notes = notes.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_intensity(mut self, intensity: Intensity) -> Self {
		self.intensity = intensity;
		self
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}
}

/// On-disk catalog record; the identifier is the map key
#[derive(Debug, Deserialize)]
struct ItemRecord {
	#[serde(default)]
	notes: Vec<String>,
	category: String,
	#[serde(default)]
	intensity: Intensity,
	#[serde(default)]
	description: String,
}

/// Read-only, ordered collection of items with unique identifiers
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	items: Vec<Item>,
	index: HashMap<String, usize>,
}

impl Catalog {
	/// Builds a catalog, preserving the given order
	pub fn new(items: Vec<Item>) -> Result<Self> {
		let mut index = HashMap::with_capacity(items.len());
		for (idx, item) in items.iter().enumerate() {
			if index.insert(item.id.clone(), idx).is_some() {
				anyhow::bail!("Duplicate item identifier: {}", item.id);
			}
		}
		Ok(Self { items, index })
	}

	/// Parses a JSON object of `id -> {notes, category, intensity, description}`
	///
	/// Items are ordered by identifier so runs over the same file agree.
	pub fn from_json(json: &str) -> Result<Self> {
		let records: BTreeMap<String, ItemRecord> = serde_json::from_str(json)?;
		let items = records
			.into_iter()
			.map(|(id, r)| Item {
				id,
				notes: r.notes,
				category: r.category,
				intensity: r.intensity,
				description: r.description,
			})
			.collect();
		Self::new(items)
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn get(&self, id: &str) -> Option<&Item> {
		self.index.get(id).map(|&idx| &self.items[idx])
	}

	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(|item| item.id.as_str())
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Every unordered pair once, in catalog order
	pub fn pairs(&self) -> impl Iterator<Item = (&Item, &Item)> {
		self.items
			.iter()
			.enumerate()
			.flat_map(move |(i, a)| self.items[i + 1..].iter().map(move |b| (a, b)))
	}
}
