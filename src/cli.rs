use clap::builder::styling::{AnsiColor, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{CACHE_FLUSH_EVERY, DEFAULT_CACHE_FILE, DEFAULT_SEED, ORACLE_TIMEOUT_MS};
use crate::engine::FeatureLayout;
use crate::processing::ReductionMethod;

/// Layout algorithm for oracle-driven embeddings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Method {
	/// Classical MDS (double centering + power iteration)
	#[default]
	Mds,
	/// Force-directed stress minimization
	Force,
}

impl From<Method> for ReductionMethod {
	fn from(m: Method) -> Self {
		match m {
			Method::Mds => ReductionMethod::Mds,
			Method::Force => ReductionMethod::ForceDirected,
		}
	}
}

/// Layout algorithm for the TF-IDF feature path
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Layout {
	/// Project feature vectors onto two principal axes
	#[default]
	Pca,
	/// Classical MDS over cosine distances
	Mds,
	/// Force-directed layout over cosine distances
	Force,
}

impl From<Layout> for FeatureLayout {
	fn from(l: Layout) -> Self {
		match l {
			Layout::Pca => FeatureLayout::Pca,
			Layout::Mds => FeatureLayout::Distances(ReductionMethod::Mds),
			Layout::Force => FeatureLayout::Distances(ReductionMethod::ForceDirected),
		}
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Blue.on_default().bold())
		.usage(AnsiColor::Blue.on_default().bold())
		.literal(AnsiColor::Blue.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
		.valid(AnsiColor::Blue.on_default())
		.invalid(AnsiColor::Red.on_default())
}

#[derive(Parser, Debug)]
#[command(
	name = "scentmap",
	author,
	version,
	about = "Lay out an essential-oil catalog in 2D from pairwise similarity",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {embed}      {embed_args}   {embed_desc}
  {bin} {vectorize}  {vec_args}         {vec_desc}
  {bin} {cache}      {cache_args}             {cache_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "scentmap".bright_blue(),
		embed = "embed".yellow(),
		embed_args = "-c oils.json -o map.json",
		embed_desc = "Pairwise similarity + MDS".dimmed(),
		vectorize = "vectorize".yellow(),
		vec_args = "-c oils.json",
		vec_desc = "TF-IDF + PCA, no oracle".dimmed(),
		cache = "cache".yellow(),
		cache_args = "stats",
		cache_desc = "Inspect the similarity cache".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Only print warnings and errors
	#[arg(short = 'q', long = "quiet", global = true)]
	pub quiet: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Build an embedding from pairwise oracle judgments
	Embed {
		/// Catalog JSON file (id -> {notes, category, intensity, description})
		#[arg(short = 'c', long = "catalog")]
		catalog: PathBuf,

		/// Output file ("-" for stdout)
		#[arg(short = 'o', long = "output", default_value = "-")]
		output: PathBuf,

		/// Similarity cache file (.json or MessagePack)
		#[arg(long = "cache", default_value = DEFAULT_CACHE_FILE)]
		cache: PathBuf,

		/// Layout algorithm
		#[arg(short = 'm', long = "method", default_value = "mds")]
		method: Method,

		/// Seed for every randomized step
		#[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
		seed: u64,

		/// Iterations for the chosen reducer (default depends on method)
		#[arg(short = 'n', long = "iterations")]
		iterations: Option<usize>,

		/// Per-pair oracle timeout in milliseconds
		#[arg(long = "timeout-ms", default_value_t = ORACLE_TIMEOUT_MS)]
		timeout_ms: u64,

		/// Persist the cache after this many new entries
		#[arg(long = "flush-every", default_value_t = CACHE_FLUSH_EVERY)]
		flush_every: usize,

		/// Ask the oracle again for pairs cached from the fallback
		#[arg(long = "retry-fallbacks")]
		retry_fallbacks: bool,
	},

	/// Build an embedding from TF-IDF note vectors only
	Vectorize {
		/// Catalog JSON file
		#[arg(short = 'c', long = "catalog")]
		catalog: PathBuf,

		/// Output file ("-" for stdout)
		#[arg(short = 'o', long = "output", default_value = "-")]
		output: PathBuf,

		/// Layout algorithm
		#[arg(short = 'l', long = "layout", default_value = "pca")]
		layout: Layout,

		/// Seed for every randomized step
		#[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
		seed: u64,
	},

	/// Inspect or clear the similarity cache
	Cache {
		#[command(subcommand)]
		action: CacheAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
	/// Show entry counts
	Stats {
		#[arg(long = "cache", default_value = DEFAULT_CACHE_FILE)]
		cache: PathBuf,
	},

	/// Remove every cached similarity
	Clear {
		#[arg(long = "cache", default_value = DEFAULT_CACHE_FILE)]
		cache: PathBuf,

		/// Skip the confirmation prompt
		#[arg(short = 'y', long = "yes")]
		auto_confirm: bool,
	},
}
