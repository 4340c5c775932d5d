//! Building occupancy grid
//!
//! A `CellGrid` holds one integer code per cell. Raw floor maps mix walkability
//! with point-of-interest markers; after [`classify_grid`](super::classify_grid)
//! only [`WALL`] and [`WALKABLE`] remain.

use super::coord::{flatten_rows, to_nested, Coordinate, GridShape};
use crate::error::{FireflyError, Result};
use serde::{Deserialize, Serialize};

/// Impassable cell.
pub const WALL: i32 = 0;
/// Open floor.
pub const WALKABLE: i32 = 1;
/// Fire exit marker (raw maps only).
pub const FIRE_EXIT: i32 = 2;
/// Medical kit marker (raw maps only).
pub const MED_KIT: i32 = 3;
/// Extinguisher marker (raw maps only).
pub const EXTINGUISHER: i32 = 4;
/// Unmapped cell (raw maps only), classified as wall.
pub const UNKNOWN: i32 = -1;

/// Point-of-interest kinds marked on raw floor maps.
///
/// Each marker is also a routing target: an occupant asks for the nearest
/// fire exit, medical kit, or extinguisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    FireExit,
    MedKit,
    Extinguisher,
}

impl Marker {
    /// All marker kinds in code order.
    pub const ALL: [Marker; 3] = [Marker::FireExit, Marker::MedKit, Marker::Extinguisher];

    /// Raw cell code for this marker.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::FireExit => FIRE_EXIT,
            Self::MedKit => MED_KIT,
            Self::Extinguisher => EXTINGUISHER,
        }
    }

    /// Marker for a raw cell code, if the code is a marker.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            FIRE_EXIT => Some(Self::FireExit),
            MED_KIT => Some(Self::MedKit),
            EXTINGUISHER => Some(Self::Extinguisher),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FireExit => "fire exit",
            Self::MedKit => "medical kit",
            Self::Extinguisher => "extinguisher",
        }
    }
}

/// Rectangular grid of cell codes in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")]
pub struct CellGrid {
    shape: GridShape,
    cells: Vec<i32>,
}

impl CellGrid {
    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if there are no rows, the rows are empty, or the
    /// rows differ in length.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self> {
        let (shape, cells) = flatten_rows(rows, "grid")?;
        Ok(Self { shape, cells })
    }

    /// Build a grid from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the shape is empty or the buffer length does not
    /// equal `rows * cols`.
    pub fn from_cells(shape: GridShape, cells: Vec<i32>) -> Result<Self> {
        shape.validate()?;
        if cells.len() != shape.len() {
            return Err(FireflyError::invalid_input(format!(
                "grid buffer has {} cells, shape {shape} needs {}",
                cells.len(),
                shape.len()
            )));
        }
        Ok(Self { shape, cells })
    }

    /// Grid of `shape` with every cell set to `code`.
    #[must_use]
    pub fn filled(shape: GridShape, code: i32) -> Self {
        Self {
            shape,
            cells: vec![code; shape.len()],
        }
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Cell code at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<i32> {
        self.shape.index(coord).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `coord`. Returns false (and does nothing) when out of bounds.
    pub fn set(&mut self, coord: Coordinate, code: i32) -> bool {
        match self.shape.index(coord) {
            Some(i) => {
                self.cells[i] = code;
                true
            }
            None => false,
        }
    }

    /// True when `coord` is in bounds and not a wall.
    #[must_use]
    pub fn is_open(&self, coord: Coordinate) -> bool {
        self.get(coord).is_some_and(|code| code != WALL)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.cells
    }

    /// Nested-row copy of the grid.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        to_nested(self.shape, &self.cells)
    }
}

impl TryFrom<Vec<Vec<i32>>> for CellGrid {
    type Error = FireflyError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<CellGrid> for Vec<Vec<i32>> {
    fn from(grid: CellGrid) -> Self {
        grid.to_rows()
    }
}
