//! Firefly core library
//!
//! Building evacuation routing under a spreading fire.
//!
//! ## Routing
//!
//! - [`grid`]: floor-plan cell codes, point-of-interest classification, and
//!   the burning-cell hazard mask
//! - [`nav`]: 8-connected breadth-first search that avoids walls and fire,
//!   straight-run simplification, and projection of cells onto longitude and
//!   latitude
//!
//! ## Fire spread
//!
//! - [`simulation`]: stochastic cellular automaton producing a sequence of
//!   hazard masks, each of which can be fed straight back into the router
//!
//! ```
//! use firefly_core::{classify_grid, CellGrid, Coordinate, Marker, Router};
//!
//! let raw = CellGrid::from_rows(vec![vec![1, 1, 2]]).unwrap();
//! let plan = classify_grid(&raw);
//! let route = Router::default()
//!     .route(&plan, Marker::FireExit, Coordinate::new(0, 0), None)
//!     .unwrap();
//! assert_eq!(route.hops(), 2);
//! ```

pub mod error;
pub mod grid;
pub mod nav;
pub mod simulation;

pub use error::{FireflyError, Result};
pub use grid::{classify_grid, CellGrid, Coordinate, FloorPlan, GridShape, HazardMask, Marker};
pub use nav::{find_path, is_safe, project, simplify, GeoAnchors, GeoPoint, Path, Route, Router};
pub use simulation::{
    simulate_fire, FireScenario, FireSimulation, FrameCache, NeighbourCounting, SpreadParams, TtiField,
};
