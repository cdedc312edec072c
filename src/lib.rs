//! # Scentmap Library
//!
//! Turns sparse pairwise similarity judgments (or TF-IDF note vectors) between
//! catalog items into stable 2D coordinates, caching the expensive judgments
//! across runs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod engine;
pub mod oracle;
pub mod processing;
pub mod storage;
pub mod ui;

pub use config::EngineConfig;
pub use engine::{embed_features, Engine, FeatureLayout, GenerationReport, PairOutcome};
