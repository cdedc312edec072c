//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	/// Suppress everything except warnings and errors
	pub fn set_quiet(enabled: bool) {
		QUIET.store(enabled, Ordering::Relaxed);
	}

	pub fn is_quiet() -> bool {
		QUIET.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	if !Log::is_quiet() {
		eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
	}
}

pub fn success(msg: &str) {
	if !Log::is_quiet() {
		eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
	}
}

pub fn warn(msg: &str) {
	eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		eprintln!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	if !Log::is_quiet() {
		eprintln!("\n{}", text.bright_blue().bold());
	}
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let name = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, name)
}

/// Score rendered green (high) through yellow to red (low)
pub fn score_color(score: f64) -> ColoredString {
	let text = format!("{:.0}%", score * 100.0);
	if score >= 0.66 {
		text.bright_green()
	} else if score >= 0.33 {
		text.yellow()
	} else {
		text.red()
	}
}
