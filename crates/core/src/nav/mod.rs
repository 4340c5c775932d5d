//! Evacuation routing
//!
//! Safety predicate, hazard-aware breadth-first search, waypoint thinning, and
//! grid-to-geographic projection, plus the [`Router`] that chains them.

pub mod projection;
pub mod route;
pub mod safety;
pub mod search;
pub mod simplify;

pub use projection::{project, GeoAnchors, GeoPoint};
pub use route::{Route, Router};
pub use safety::is_safe;
pub use search::{find_path, GoalSet, Path};
pub use simplify::simplify;
