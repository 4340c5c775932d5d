//! Burning-cell masks
//!
//! A `HazardMask` marks which cells are on fire. Path search treats it as a
//! frozen obstacle layer; the fire simulator produces one per step as a key
//! frame. Cells are stored as `0`/`1` so masks serialize the same way the floor
//! maps they pair with do.

use super::coord::{flatten_rows, to_nested, Coordinate, GridShape};
use crate::error::{FireflyError, Result};
use serde::{Deserialize, Serialize};

/// Not burning.
pub const CLEAR: u8 = 0;
/// Burning.
pub const BURNING: u8 = 1;

/// Row-major 0/1 grid of burning cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct HazardMask {
    shape: GridShape,
    cells: Vec<u8>,
}

impl HazardMask {
    /// Mask of `shape` with nothing burning.
    #[must_use]
    pub fn clear(shape: GridShape) -> Self {
        Self {
            shape,
            cells: vec![CLEAR; shape.len()],
        }
    }

    /// Build a mask from nested rows of `0`/`1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty or ragged rows, or any value other than 0 or 1.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let (shape, cells) = flatten_rows(rows, "hazard mask")?;
        Self::from_cells(shape, cells)
    }

    /// Build a mask from a row-major buffer of `0`/`1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the buffer length does not match `shape` or it
    /// holds a value other than 0 or 1.
    pub fn from_cells(shape: GridShape, cells: Vec<u8>) -> Result<Self> {
        shape.validate()?;
        if cells.len() != shape.len() {
            return Err(FireflyError::invalid_input(format!(
                "hazard mask buffer has {} cells, shape {shape} needs {}",
                cells.len(),
                shape.len()
            )));
        }
        if let Some(pos) = cells.iter().position(|&v| v > BURNING) {
            return Err(FireflyError::invalid_input(format!(
                "hazard mask cell {} holds {}, expected 0 or 1",
                shape.coord(pos),
                cells[pos]
            )));
        }
        Ok(Self { shape, cells })
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Whether `coord` is burning. Out-of-bounds cells never burn.
    #[must_use]
    pub fn is_burning(&self, coord: Coordinate) -> bool {
        self.shape
            .index(coord)
            .is_some_and(|i| self.cells[i] == BURNING)
    }

    #[inline]
    pub(crate) fn is_burning_at(&self, index: usize) -> bool {
        self.cells[index] == BURNING
    }

    /// Set `coord` burning. Returns false when out of bounds.
    pub fn ignite(&mut self, coord: Coordinate) -> bool {
        match self.shape.index(coord) {
            Some(i) => {
                self.cells[i] = BURNING;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub(crate) fn ignite_at(&mut self, index: usize) {
        self.cells[index] = BURNING;
    }

    /// Number of burning cells.
    #[must_use]
    pub fn burning_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == BURNING).count()
    }

    /// Burning cells in row-major order.
    #[must_use]
    pub fn burning_cells(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == BURNING)
            .map(|(i, _)| self.shape.coord(i))
            .collect()
    }

    /// True if every cell burning in `earlier` is also burning here.
    #[must_use]
    pub fn contains_all(&self, earlier: &HazardMask) -> bool {
        self.shape == earlier.shape
            && self
                .cells
                .iter()
                .zip(&earlier.cells)
                .all(|(&now, &before)| before == CLEAR || now == BURNING)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Nested-row copy of the mask.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        to_nested(self.shape, &self.cells)
    }
}

impl TryFrom<Vec<Vec<u8>>> for HazardMask {
    type Error = FireflyError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<HazardMask> for Vec<Vec<u8>> {
    fn from(mask: HazardMask) -> Self {
        mask.to_rows()
    }
}
