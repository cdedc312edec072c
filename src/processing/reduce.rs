//! Common interface of the 2D layout algorithms

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::distance::DistanceMatrix;
use super::eigen::PowerIteration;
use super::force::ForceDirected;
use super::mds::ClassicalMds;
use crate::config::EngineConfig;
use crate::core::Point2;

/// Turns a distance matrix into one 2D point per row, in row order
pub trait DimensionReducer {
	fn reduce(&self, distances: &DistanceMatrix) -> Result<Vec<Point2>>;

	fn name(&self) -> &'static str;
}

/// Which reducer a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReductionMethod {
	/// Classical MDS: double centering plus power iteration
	#[default]
	Mds,
	/// Stress minimization by damped pairwise forces
	ForceDirected,
}

impl ReductionMethod {
	pub fn reducer(self, config: &EngineConfig) -> Box<dyn DimensionReducer> {
		match self {
			ReductionMethod::Mds => Box::new(ClassicalMds::new(PowerIteration::new(
				config.power_iterations,
				config.seed,
			))),
			ReductionMethod::ForceDirected => Box::new(ForceDirected::new(
				config.force_iterations,
				config.learning_rate,
				config.seed,
			)),
		}
	}
}

pub(crate) fn require_embeddable(distances: &DistanceMatrix) -> Result<()> {
	if distances.len() < 2 {
		anyhow::bail!(
			"Need at least 2 items to embed, got {}",
			distances.len()
		);
	}
	Ok(())
}
