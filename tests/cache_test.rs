// Similarity cache persistence and canonical keys

use std::fs;

use scentmap::core::{PairKey, Similarity};
use scentmap::storage::{ScoreSource, SimilarityCache};
use tempfile::tempdir;

fn sim(v: f64) -> Similarity {
	Similarity::new(v).unwrap()
}

#[test]
fn pair_key_is_order_independent() {
	assert_eq!(PairKey::new("rose", "cedar"), PairKey::new("cedar", "rose"));
	assert_eq!(PairKey::new("rose", "cedar").as_str(), "cedar|rose");
}

#[test]
fn lookup_is_symmetric() {
	let mut cache = SimilarityCache::in_memory();
	cache
		.store("lemon", "bergamot", sim(0.8), None, ScoreSource::Oracle)
		.unwrap();
	assert_eq!(cache.lookup("lemon", "bergamot"), Some(sim(0.8)));
	assert_eq!(cache.lookup("bergamot", "lemon"), Some(sim(0.8)));
	assert_eq!(cache.lookup("lemon", "vetiver"), None);
}

#[test]
fn self_pair_is_max_and_not_stored() {
	let mut cache = SimilarityCache::in_memory();
	cache.store("rose", "rose", sim(0.2), None, ScoreSource::Oracle).unwrap();
	assert!(cache.is_empty());
	assert_eq!(cache.lookup("rose", "rose"), Some(Similarity::MAX));
}

#[test]
fn json_round_trip_through_fresh_instance() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("cache.json");

	let mut cache = SimilarityCache::open(&path, 100);
	cache
		.store("a", "b", sim(0.42), Some("shared notes".into()), ScoreSource::Oracle)
		.unwrap();
	cache.store("c", "a", sim(0.3), None, ScoreSource::Fallback).unwrap();
	cache.flush().unwrap();

	let reloaded = SimilarityCache::open(&path, 100);
	assert_eq!(reloaded.len(), 2);
	assert_eq!(reloaded.lookup("b", "a"), Some(sim(0.42)));
	assert_eq!(reloaded.lookup("a", "c"), Some(sim(0.3)));

	let entry = reloaded.entry("a", "b").unwrap();
	assert_eq!(entry.explanation.as_deref(), Some("shared notes"));
	assert_eq!(entry.source, ScoreSource::Oracle);
	assert_eq!(reloaded.entry("a", "c").unwrap().source, ScoreSource::Fallback);
}

#[test]
fn messagepack_round_trip() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("cache.msgpack");

	let mut cache = SimilarityCache::open(&path, 1);
	cache.store("x", "y", sim(0.9), None, ScoreSource::Oracle).unwrap();

	let reloaded = SimilarityCache::open(&path, 1);
	assert_eq!(reloaded.lookup("y", "x"), Some(sim(0.9)));
}

#[test]
fn flushes_every_k_new_entries() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("cache.json");
	let mut cache = SimilarityCache::open(&path, 3);

	cache.store("a", "b", sim(0.1), None, ScoreSource::Oracle).unwrap();
	cache.store("a", "c", sim(0.2), None, ScoreSource::Oracle).unwrap();
	assert!(!path.exists());
	assert_eq!(cache.pending(), 2);

	cache.store("b", "c", sim(0.3), None, ScoreSource::Oracle).unwrap();
	assert!(path.exists());
	assert_eq!(cache.pending(), 0);
	assert_eq!(SimilarityCache::open(&path, 3).len(), 3);
}

#[test]
fn corrupt_file_loads_as_empty() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("cache.json");
	fs::write(&path, "{ not json").unwrap();

	let mut cache = SimilarityCache::open(&path, 5);
	assert!(cache.is_empty());

	// Still usable and overwrites the broken file on flush
	cache.store("a", "b", sim(0.5), None, ScoreSource::Oracle).unwrap();
	cache.flush().unwrap();
	assert_eq!(SimilarityCache::open(&path, 5).lookup("a", "b"), Some(sim(0.5)));
}

#[test]
fn missing_file_loads_as_empty() {
	let dir = tempdir().unwrap();
	let cache = SimilarityCache::open(dir.path().join("absent.json"), 5);
	assert!(cache.is_empty());
}

#[test]
fn oracle_entries_are_not_overwritten() {
	let mut cache = SimilarityCache::in_memory();
	cache.store("a", "b", sim(0.7), None, ScoreSource::Oracle).unwrap();
	cache.store("b", "a", sim(0.1), None, ScoreSource::Oracle).unwrap();
	assert_eq!(cache.lookup("a", "b"), Some(sim(0.7)));
}

#[test]
fn oracle_answer_supersedes_fallback() {
	let mut cache = SimilarityCache::in_memory();
	cache.store("a", "b", sim(0.3), None, ScoreSource::Fallback).unwrap();
	cache.store("a", "b", sim(0.85), None, ScoreSource::Oracle).unwrap();
	assert_eq!(cache.lookup("a", "b"), Some(sim(0.85)));
	assert_eq!(cache.stats().from_fallback, 0);
}

#[test]
fn clear_persists_empty_cache() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("cache.json");
	let mut cache = SimilarityCache::open(&path, 1);
	cache.store("a", "b", sim(0.5), None, ScoreSource::Oracle).unwrap();

	cache.clear().unwrap();
	assert!(cache.is_empty());
	assert!(SimilarityCache::open(&path, 1).is_empty());
}

#[test]
fn similarity_rejects_out_of_range() {
	assert!(Similarity::new(1.2).is_err());
	assert!(Similarity::new(-0.1).is_err());
	assert!(Similarity::new(f64::NAN).is_err());
	assert_eq!(Similarity::clamped(3.0), Similarity::MAX);
	assert_eq!(Similarity::from_percent(60.0).unwrap(), sim(0.6));
}
