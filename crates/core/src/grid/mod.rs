//! Building grid data model

pub mod cell_grid;
pub mod classify;
pub mod coord;
pub mod hazard;

// Re-export main types
pub use cell_grid::*;
pub use classify::*;
pub use coord::{Coordinate, GridShape, COMPASS_OFFSETS};
pub use hazard::*;
