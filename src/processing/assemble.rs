//! Joins coordinates with catalog metadata into the output record set

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::core::{
	Catalog, EmbeddedItem, EmbeddingMetadata, EmbeddingSet, Point2, Similarity, SimilarityMatrix,
};

/// Builds the embedding record set for `ids`, positioned by `points`
///
/// `ids[i]` is placed at `points[i]`. When a similarity matrix is given it is
/// exported alongside, with every item's self-similarity set to the maximum.
/// Output depends only on the inputs, so repeated calls agree exactly.
pub fn assemble(
	catalog: &Catalog,
	ids: &[String],
	points: &[Point2],
	similarities: Option<&SimilarityMatrix>,
	total_comparisons: usize,
	generated_at: DateTime<Utc>,
) -> Result<EmbeddingSet> {
	if ids.len() != points.len() {
		anyhow::bail!(
			"Got {} coordinates for {} items",
			points.len(),
			ids.len()
		);
	}

	let mut embeddings = BTreeMap::new();
	for (id, point) in ids.iter().zip(points) {
		let Some(item) = catalog.get(id) else {
			anyhow::bail!("Item {} is not in the catalog", id);
		};
		embeddings.insert(
			id.clone(),
			EmbeddedItem {
				x: point.x,
				y: point.y,
				category: item.category.clone(),
				intensity: item.intensity,
				description: item.description.clone(),
				notes: item.notes.clone(),
			},
		);
	}

	let similarity_matrix = similarities.map(|m| export_matrix(m, ids));

	Ok(EmbeddingSet {
		embeddings,
		metadata: EmbeddingMetadata {
			total_items: ids.len(),
			total_comparisons,
			generated_at,
		},
		similarity_matrix,
	})
}

/// Nested `id -> id -> score` map; unjudged pairs are left out
fn export_matrix(matrix: &SimilarityMatrix, ids: &[String]) -> BTreeMap<String, BTreeMap<String, f64>> {
	ids.iter()
		.map(|a| {
			let row = ids
				.iter()
				.filter_map(|b| {
					let score = if a == b {
						Some(Similarity::MAX)
					} else {
						matrix.get(a, b)
					};
					score.map(|s| (b.clone(), s.value()))
				})
				.collect();
			(a.clone(), row)
		})
		.collect()
}
