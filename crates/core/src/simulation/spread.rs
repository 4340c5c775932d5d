//! Neighbourhood counting and ignition probability

use super::params::{NeighbourCounting, SpreadParams};
use crate::grid::{Coordinate, HazardMask};

/// Order in which a burning source offers ignition to its neighbours.
///
/// Row offset outer, column offset inner. Random draws are consumed in this
/// order, so changing it changes every seeded run.
pub const RASTER_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Burning cells around `coord` as `(near, far)`.
///
/// `near` covers the 3x3 box, `far` the ring between the 3x3 and 5x5 boxes.
/// Under [`NeighbourCounting::Reference`] the 3x3 box is counted twice.
/// Out-of-bounds cells count as not burning.
#[must_use]
pub fn neighbour_factor(state: &HazardMask, coord: Coordinate, counting: NeighbourCounting) -> (u32, u32) {
    let mut near = 0;
    let mut far = 0;
    for dr in -2..=2_i32 {
        for dc in -2..=2_i32 {
            if !state.is_burning(coord.offset(dr, dc)) {
                continue;
            }
            if dr.abs() < 2 && dc.abs() < 2 {
                near += 1;
            } else {
                far += 1;
            }
        }
    }
    if counting == NeighbourCounting::Reference {
        near *= 2;
    }
    (near, far)
}

/// Probability that a candidate cell catches fire this step, before `gamma`.
///
/// `tti_fraction` is the cell's time-to-ignite divided by `MAX_TTI`.
#[must_use]
pub fn spread_probability(near: u32, far: u32, tti_fraction: f64, params: &SpreadParams) -> f64 {
    let near = f64::from(near) / 8.0;
    let far = params.beta * f64::from(far) / 16.0;
    1.0 - (-params.alpha * (1.0 + near + far) * tti_fraction).exp()
}
