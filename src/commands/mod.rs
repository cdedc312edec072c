//! # Command Implementations
//!
//! Each submodule handles one CLI command.

pub mod cache;
pub mod embed;
pub mod vectorize;
