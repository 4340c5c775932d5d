//! Splitting annotated floor maps into a navigable grid and marker lists

use super::cell_grid::{CellGrid, Marker, UNKNOWN, WALKABLE, WALL};
use super::coord::Coordinate;
use serde::{Deserialize, Serialize};

/// A classified floor map: walls and open floor only, with the point-of-interest
/// markers pulled out into coordinate lists in row-major scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub grid: CellGrid,
    pub fire_exits: Vec<Coordinate>,
    pub med_kits: Vec<Coordinate>,
    pub extinguishers: Vec<Coordinate>,
}

impl FloorPlan {
    /// Marker coordinates for a target kind.
    #[must_use]
    pub fn targets(&self, marker: Marker) -> &[Coordinate] {
        match marker {
            Marker::FireExit => &self.fire_exits,
            Marker::MedKit => &self.med_kits,
            Marker::Extinguisher => &self.extinguishers,
        }
    }
}

/// Classify a raw floor map.
///
/// Marker cells (2, 3, 4) are recorded in their list and rewritten as walkable;
/// unknown cells (-1) become walls; everything else passes through unchanged.
/// Duplicate markers are kept, one coordinate each.
#[must_use]
pub fn classify_grid(raw: &CellGrid) -> FloorPlan {
    let shape = raw.shape();
    let mut grid = raw.clone();
    let mut fire_exits = Vec::new();
    let mut med_kits = Vec::new();
    let mut extinguishers = Vec::new();

    for (index, cell) in grid.as_mut_slice().iter_mut().enumerate() {
        if let Some(marker) = Marker::from_code(*cell) {
            let coord = shape.coord(index);
            match marker {
                Marker::FireExit => fire_exits.push(coord),
                Marker::MedKit => med_kits.push(coord),
                Marker::Extinguisher => extinguishers.push(coord),
            }
            *cell = WALKABLE;
        } else if *cell == UNKNOWN {
            *cell = WALL;
        }
    }

    tracing::debug!(
        "Classified {} grid: {} exits, {} med kits, {} extinguishers",
        shape,
        fire_exits.len(),
        med_kits.len(),
        extinguishers.len()
    );

    FloorPlan {
        grid,
        fire_exits,
        med_kits,
        extinguishers,
    }
}
