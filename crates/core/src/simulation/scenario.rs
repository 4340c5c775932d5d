//! Serializable fire scenario description

use super::params::{NeighbourCounting, SpreadParams};
use super::simulate_fire;
use crate::error::Result;
use crate::grid::{Coordinate, GridShape, HazardMask};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Frame budget used when a scenario omits `steps`.
pub const DEFAULT_STEPS: usize = 50;

fn default_steps() -> usize {
    DEFAULT_STEPS
}

/// Everything needed to reproduce a fire run.
///
/// Without a `seed` the run draws from OS entropy and is not repeatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireScenario {
    pub ignite: Coordinate,
    pub shape: GridShape,
    #[serde(default)]
    pub params: SpreadParams,
    #[serde(default = "default_steps")]
    pub steps: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Hashable identity of a seeded scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioKey {
    ignite: Coordinate,
    shape: GridShape,
    alpha: u64,
    beta: u64,
    gamma: u64,
    counting: NeighbourCounting,
    steps: usize,
    seed: u64,
}

impl FireScenario {
    #[must_use]
    pub fn new(ignite: Coordinate, shape: GridShape) -> Self {
        Self {
            ignite,
            shape,
            params: SpreadParams::default(),
            steps: DEFAULT_STEPS,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: SpreadParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the scenario, returning `steps - 1` frames.
    ///
    /// # Errors
    ///
    /// Same as [`simulate_fire`].
    pub fn run(&self) -> Result<Vec<HazardMask>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        simulate_fire(self.ignite, self.shape, &self.params, self.steps, &mut rng)
    }

    /// Cache identity, available only for seeded scenarios.
    #[must_use]
    pub fn key(&self) -> Option<ScenarioKey> {
        self.seed.map(|seed| ScenarioKey {
            ignite: self.ignite,
            shape: self.shape,
            alpha: self.params.alpha.to_bits(),
            beta: self.params.beta.to_bits(),
            gamma: self.params.gamma.to_bits(),
            counting: self.params.counting,
            steps: self.steps,
            seed,
        })
    }
}
