//! Failures at the oracle boundary

use thiserror::Error;

/// Why an oracle could not produce a judgment for a pair
///
/// None of these abort matrix generation; the engine substitutes the
/// fallback score and logs a warning.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
	#[error("oracle timed out after {0}ms")]
	Timeout(u64),

	#[error("oracle unavailable: {0}")]
	Unavailable(String),

	#[error("malformed oracle response: {0}")]
	Malformed(String),
}
