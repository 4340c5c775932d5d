//! Cell safety predicate

use crate::grid::{CellGrid, Coordinate, HazardMask};

/// Whether an occupant may stand on `coord`.
///
/// False when the coordinate is out of bounds, the cell is a wall, or the cell
/// is burning in `hazard`. Only [`WALL`](crate::grid::WALL) blocks movement;
/// any other code counts as floor. A missing mask means nothing is burning.
#[must_use]
pub fn is_safe(grid: &CellGrid, coord: Coordinate, hazard: Option<&HazardMask>) -> bool {
    grid.is_open(coord) && !hazard.is_some_and(|mask| mask.is_burning(coord))
}
