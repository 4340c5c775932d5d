//! Spread model hyperparameters

use crate::error::{FireflyError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of the per-cell time-to-ignite draw.
pub const MAX_TTI: u32 = 500;

/// How burning cells inside the candidate's 3x3 box enter the `near` count.
///
/// The reference model scans the 3x3 box and then the 5x5 box, and adds inner
/// cells to `near` on both passes. `Reference` keeps that behaviour so results
/// line up with recorded runs; `Exclusive` counts each inner cell once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighbourCounting {
    /// Inner burning cells are counted twice.
    #[default]
    Reference,
    /// Inner burning cells are counted once.
    Exclusive,
}

/// Ignition model parameters.
///
/// `p = 1 - exp(-alpha * (1 + near/8 + beta * far/16) * tti/MAX_TTI)`, and a
/// candidate ignites when a uniform draw falls below `gamma * p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadParams {
    /// Overall scale of the exponent.
    pub alpha: f64,
    /// Weight of burning cells in the outer ring.
    pub beta: f64,
    /// Speed factor applied to the ignition probability.
    pub gamma: f64,
    pub counting: NeighbourCounting,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.5,
            gamma: 0.1,
            counting: NeighbourCounting::Reference,
        }
    }
}

impl SpreadParams {
    #[must_use]
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_counting(mut self, counting: NeighbourCounting) -> Self {
        self.counting = counting;
        self
    }

    /// Check that every parameter is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FireflyError::invalid_input(format!(
                    "spread parameter {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
