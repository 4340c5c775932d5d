//! Error types raised by the routing and fire-spread engines.
//!
//! Only malformed requests and unsafe entry points are errors. A search that
//! exhausts its frontier without reaching a goal is a normal outcome and is
//! reported as an empty path.

use crate::grid::{Coordinate, GridShape};
use thiserror::Error;

/// Errors surfaced by the core engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireflyError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("entry cell {entry} is a wall or currently burning")]
    UnsafeEntry { entry: Coordinate },
}

impl FireflyError {
    /// Create an `InvalidInput` error with a free-form reason.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidInput` error for two grids whose shapes disagree.
    ///
    /// # Arguments
    /// * `what` - Name of the mismatched grid (e.g. `"hazard mask"`, `"tti field"`)
    /// * `expected` - Shape of the grid it must pair with
    /// * `actual` - Shape that was supplied
    pub fn shape_mismatch(what: &str, expected: GridShape, actual: GridShape) -> Self {
        Self::invalid_input(format!(
            "{what} shape {actual} does not match grid shape {expected}"
        ))
    }

    /// Create an `InvalidInput` error for a coordinate outside the grid.
    pub fn out_of_bounds(what: &str, coordinate: Coordinate, shape: GridShape) -> Self {
        Self::invalid_input(format!("{what} {coordinate} is outside grid {shape}"))
    }

    /// Whether this error reports a malformed request rather than an unsafe entry.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, FireflyError>;
