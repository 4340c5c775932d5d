//! Per-cell time-to-ignite field
//!
//! Each cell carries a latent resistance drawn once per run from
//! `[1, MAX_TTI)`. The field never changes during a run; buildings that keep a
//! stored field can pass it in instead of drawing a fresh one.

use super::params::MAX_TTI;
use crate::error::{FireflyError, Result};
use crate::grid::coord::{flatten_rows, to_nested};
use crate::grid::{Coordinate, GridShape};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Row-major grid of time-to-ignite values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct TtiField {
    shape: GridShape,
    values: Vec<u32>,
}

impl TtiField {
    /// Draw an independent uniform value in `[1, MAX_TTI)` for every cell.
    pub fn generate<R: Rng + ?Sized>(shape: GridShape, rng: &mut R) -> Self {
        let values = (0..shape.len())
            .map(|_| rng.random_range(1..MAX_TTI))
            .collect();
        Self { shape, values }
    }

    /// Wrap a stored row-major field.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the buffer length does not match `shape` or a
    /// value lies outside `[1, MAX_TTI)`.
    pub fn from_values(shape: GridShape, values: Vec<u32>) -> Result<Self> {
        shape.validate()?;
        if values.len() != shape.len() {
            return Err(FireflyError::invalid_input(format!(
                "tti buffer has {} cells, shape {shape} needs {}",
                values.len(),
                shape.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !(1..MAX_TTI).contains(v)) {
            return Err(FireflyError::invalid_input(format!(
                "tti value {} at {} is outside [1, {MAX_TTI})",
                values[pos],
                shape.coord(pos)
            )));
        }
        Ok(Self { shape, values })
    }

    /// Wrap a stored field given as nested rows.
    ///
    /// # Errors
    ///
    /// Same as [`TtiField::from_values`], plus empty or ragged rows.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let (shape, values) = flatten_rows(rows, "tti field")?;
        Self::from_values(shape, values)
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<u32> {
        self.shape.index(coord).map(|i| self.values[i])
    }

    /// `tti / MAX_TTI` for a flat index.
    #[inline]
    pub(crate) fn fraction_at(&self, index: usize) -> f64 {
        f64::from(self.values[index]) / f64::from(MAX_TTI)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        to_nested(self.shape, &self.values)
    }
}

impl TryFrom<Vec<Vec<u32>>> for TtiField {
    type Error = FireflyError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<TtiField> for Vec<Vec<u32>> {
    fn from(field: TtiField) -> Self {
        field.to_rows()
    }
}
