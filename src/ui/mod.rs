//! # User Interface
//!
//! Colored terminal logging. Everything goes to stderr so JSON written to
//! stdout stays clean.

pub mod log;

pub use log::{debug, error, header, info, path_link, score_color, success, warn, Log};
