//! Stochastic fire spread over a building grid
//!
//! A cellular automaton on the same grid the router uses. Each step, every
//! burning cell offers ignition to its eight neighbours; a neighbour catches
//! with probability `gamma * p`, where `p` grows with the number of burning
//! cells around it and with its own time-to-ignite (see [`spread_probability`]).
//! Burning cells never extinguish, so the burning set only grows.
//!
//! Probabilities for a step are computed in parallel from the start-of-step
//! snapshot. Random draws are then consumed sequentially in row-major source
//! order and [`RASTER_OFFSETS`] neighbour order, so a seeded generator always
//! reproduces the same frames.

pub mod cache;
pub mod params;
pub mod scenario;
pub mod spread;
pub mod tti;

pub use cache::FrameCache;
pub use params::{NeighbourCounting, SpreadParams, MAX_TTI};
pub use scenario::FireScenario;
pub use spread::{neighbour_factor, spread_probability, RASTER_OFFSETS};
pub use tti::TtiField;

use crate::error::{FireflyError, Result};
use crate::grid::{Coordinate, GridShape, HazardMask};
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

/// A running fire spread automaton.
///
/// Owns its random source; pass `&mut rng` to borrow one instead.
#[derive(Debug, Clone)]
pub struct FireSimulation<R: Rng> {
    state: HazardMask,
    tti: TtiField,
    params: SpreadParams,
    rng: R,
    steps_taken: usize,
}

impl<R: Rng> FireSimulation<R> {
    /// Start a fire at `ignite` with a freshly drawn time-to-ignite field.
    ///
    /// # Arguments
    ///
    /// * `ignite` - Initial burning cell
    /// * `shape` - Grid dimensions
    /// * `params` - Spread parameters
    /// * `rng` - Random source for the field and every later step
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `shape` is empty, `ignite` lies outside it,
    /// or a parameter is negative or not finite.
    pub fn new(ignite: Coordinate, shape: GridShape, params: SpreadParams, mut rng: R) -> Result<Self> {
        shape.validate()?;
        let tti = TtiField::generate(shape, &mut rng);
        Self::with_tti(ignite, tti, params, rng)
    }

    /// Start a fire at `ignite` over a stored time-to-ignite field.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `ignite` lies outside the field or a
    /// parameter is negative or not finite.
    pub fn with_tti(ignite: Coordinate, tti: TtiField, params: SpreadParams, rng: R) -> Result<Self> {
        params.validate()?;
        let shape = tti.shape();
        let mut state = HazardMask::clear(shape);
        if !state.ignite(ignite) {
            return Err(FireflyError::out_of_bounds("ignition cell", ignite, shape));
        }

        info!(
            "Fire simulation initialized: {} grid, ignition at {}, alpha={}, beta={}, gamma={}, counting={:?}",
            shape, ignite, params.alpha, params.beta, params.gamma, params.counting
        );

        Ok(Self {
            state,
            tti,
            params,
            rng,
            steps_taken: 0,
        })
    }

    /// Advance one step and return the new burning set.
    pub fn step(&mut self) -> &HazardMask {
        let shape = self.state.shape();
        let probabilities = candidate_probabilities(&self.state, &self.tti, &self.params);

        let mut next = self.state.clone();
        let mut ignited = 0_usize;
        for source in 0..shape.len() {
            if !self.state.is_burning_at(source) {
                continue;
            }
            let here = shape.coord(source);
            for (dr, dc) in RASTER_OFFSETS {
                let Some(candidate) = shape.index(here.offset(dr, dc)) else {
                    continue;
                };
                if self.state.is_burning_at(candidate) {
                    continue;
                }
                let draw: f64 = self.rng.random();
                if draw < self.params.gamma * probabilities[candidate] && !next.is_burning_at(candidate) {
                    next.ignite_at(candidate);
                    ignited += 1;
                }
            }
        }

        self.state = next;
        self.steps_taken += 1;
        debug!(
            "Fire step {}: {} burning (+{})",
            self.steps_taken,
            self.state.burning_count(),
            ignited
        );
        &self.state
    }

    /// Advance `count` steps, collecting a snapshot after each.
    pub fn run(&mut self, count: usize) -> Vec<HazardMask> {
        (0..count).map(|_| self.step().clone()).collect()
    }

    /// Current burning set.
    #[must_use]
    pub fn state(&self) -> &HazardMask {
        &self.state
    }

    #[must_use]
    pub fn tti(&self) -> &TtiField {
        &self.tti
    }

    #[must_use]
    pub fn params(&self) -> &SpreadParams {
        &self.params
    }

    /// Steps advanced since ignition.
    #[must_use]
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}

/// Simulate a fire from a single ignition cell.
///
/// The initial state (ignition only) is not returned. The result holds
/// `steps - 1` frames; frame `i` is the burning set after `i + 1` steps.
///
/// # Arguments
///
/// * `ignite` - Initial burning cell
/// * `shape` - Grid dimensions
/// * `params` - Spread parameters
/// * `steps` - Frame budget, counting the unreturned initial state
/// * `rng` - Random source; a seeded generator gives reproducible frames
///
/// # Errors
///
/// Returns `InvalidInput` if `steps` is zero, `shape` is empty, `ignite` lies
/// outside the grid, or a parameter is negative or not finite.
pub fn simulate_fire<R: Rng + ?Sized>(
    ignite: Coordinate,
    shape: GridShape,
    params: &SpreadParams,
    steps: usize,
    rng: &mut R,
) -> Result<Vec<HazardMask>> {
    if steps == 0 {
        return Err(FireflyError::invalid_input("steps must be at least 1"));
    }
    let mut sim = FireSimulation::new(ignite, shape, *params, rng)?;
    let frames = sim.run(steps - 1);
    info!(
        "Fire simulation finished: {} frames, {} cells burning",
        frames.len(),
        sim.state().burning_count()
    );
    Ok(frames)
}

/// Unscaled ignition probability for every cell, from one snapshot.
///
/// Burning cells and cells with no burning 8-neighbour get 0.
fn candidate_probabilities(state: &HazardMask, tti: &TtiField, params: &SpreadParams) -> Vec<f64> {
    let shape = state.shape();
    (0..shape.len())
        .into_par_iter()
        .map(|index| {
            if state.is_burning_at(index) {
                return 0.0;
            }
            let coord = shape.coord(index);
            if !shape.neighbours(coord).any(|(_, n)| state.is_burning_at(n)) {
                return 0.0;
            }
            let (near, far) = neighbour_factor(state, coord, params.counting);
            spread_probability(near, far, tti.fraction_at(index), params)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chebyshev(a: Coordinate, b: Coordinate) -> i32 {
        (a.row - b.row).abs().max((a.col - b.col).abs())
    }

    #[test]
    fn test_single_step_budget_returns_no_frames() {
        let mut rng = StdRng::seed_from_u64(1);
        let frames = simulate_fire(
            Coordinate::new(2, 2),
            GridShape::new(5, 5),
            &SpreadParams::default(),
            1,
            &mut rng,
        )
        .unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_frame_count_and_ignition_kept() {
        let ignite = Coordinate::new(3, 4);
        let mut rng = StdRng::seed_from_u64(2);
        let frames = simulate_fire(ignite, GridShape::new(8, 9), &SpreadParams::default(), 6, &mut rng).unwrap();
        assert_eq!(frames.len(), 5);
        for frame in &frames {
            assert_eq!(frame.shape(), GridShape::new(8, 9));
            assert!(frame.is_burning(ignite));
        }
    }

    #[test]
    fn test_burning_set_never_shrinks() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = SpreadParams::new(1.0, 0.5, 0.6);
        let frames = simulate_fire(Coordinate::new(10, 10), GridShape::new(20, 20), &params, 30, &mut rng).unwrap();
        for pair in frames.windows(2) {
            assert!(pair[1].contains_all(&pair[0]));
        }
    }

    #[test]
    fn test_zero_gamma_never_spreads() {
        let mut rng = StdRng::seed_from_u64(4);
        let params = SpreadParams::new(1.0, 0.5, 0.0);
        let frames = simulate_fire(Coordinate::new(1, 1), GridShape::new(4, 4), &params, 10, &mut rng).unwrap();
        assert_eq!(frames.len(), 9);
        for frame in frames {
            assert_eq!(frame.burning_cells(), vec![Coordinate::new(1, 1)]);
        }
    }

    #[test]
    fn test_saturated_spread_grows_chebyshev_ball() {
        let ignite = Coordinate::new(4, 2);
        let shape = GridShape::new(9, 9);
        let params = SpreadParams::new(1e6, 0.5, 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let frames = simulate_fire(ignite, shape, &params, 5, &mut rng).unwrap();
        for (i, frame) in frames.iter().enumerate() {
            let radius = i32::try_from(i).unwrap() + 1;
            for index in 0..shape.len() {
                let cell = shape.coord(index);
                assert_eq!(
                    frame.is_burning(cell),
                    chebyshev(cell, ignite) <= radius,
                    "frame {i}, cell {cell}"
                );
            }
        }
    }

    #[test]
    fn test_only_ignition_neighbours_catch_first() {
        let ignite = Coordinate::new(5, 5);
        let mut rng = StdRng::seed_from_u64(6);
        let params = SpreadParams::new(2.0, 0.5, 0.9);
        let frames = simulate_fire(ignite, GridShape::new(11, 11), &params, 2, &mut rng).unwrap();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].burning_count() >= 1);
        assert!(frames[0].is_burning(ignite));
        for cell in frames[0].burning_cells() {
            assert!(chebyshev(cell, ignite) <= 1);
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        let params = SpreadParams::new(1.0, 0.5, 0.5);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            simulate_fire(Coordinate::new(6, 6), GridShape::new(12, 12), &params, 15, &mut rng).unwrap()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_stored_tti_field_is_used() {
        let tti = TtiField::from_values(GridShape::new(3, 3), vec![499; 9]).unwrap();
        let rng = StdRng::seed_from_u64(7);
        let params = SpreadParams::new(1e6, 0.5, 1.0);
        let mut sim = FireSimulation::with_tti(Coordinate::new(1, 1), tti, params, rng).unwrap();
        assert_eq!(sim.step().burning_count(), 9);
        assert_eq!(sim.steps_taken(), 1);
        assert_eq!(sim.tti().as_slice(), &[499; 9]);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let params = SpreadParams::default();
        let shape = GridShape::new(4, 4);
        let inside = Coordinate::new(0, 0);

        assert!(simulate_fire(inside, shape, &params, 0, &mut rng).unwrap_err().is_invalid_input());
        assert!(simulate_fire(Coordinate::new(4, 0), shape, &params, 5, &mut rng).is_err());
        assert!(simulate_fire(Coordinate::new(0, -1), shape, &params, 5, &mut rng).is_err());
        assert!(simulate_fire(inside, GridShape::new(0, 4), &params, 5, &mut rng).is_err());
        let bad = SpreadParams::new(-1.0, 0.5, 0.1);
        assert!(simulate_fire(inside, shape, &bad, 5, &mut rng).is_err());
    }
}
