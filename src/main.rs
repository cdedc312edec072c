//! Scentmap - similarity-driven 2D maps of essential-oil catalogs

use anyhow::Result;
use clap::Parser;

use scentmap::cli::{CacheAction, Cli, Command};
use scentmap::commands::{self, embed::EmbedOptions};
use scentmap::ui::{self, Log};

fn main() {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	Log::set_quiet(cli.quiet);

	if let Err(e) = run(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(command: Command) -> Result<()> {
	match command {
		Command::Embed {
			catalog,
			output,
			cache,
			method,
			seed,
			iterations,
			timeout_ms,
			flush_every,
			retry_fallbacks,
		} => commands::embed::run(EmbedOptions {
			catalog: &catalog,
			output: &output,
			cache: &cache,
			method: method.into(),
			seed,
			iterations,
			timeout_ms,
			flush_every,
			retry_fallbacks,
		}),
		Command::Vectorize {
			catalog,
			output,
			layout,
			seed,
		} => commands::vectorize::run(&catalog, &output, layout.into(), seed),
		Command::Cache { action } => match action {
			CacheAction::Stats { cache } => commands::cache::stats(&cache),
			CacheAction::Clear { cache, auto_confirm } => commands::cache::clear(&cache, auto_confirm),
		},
	}
}
