//! End-to-end evacuation routing
//!
//! `Router` runs the full pipeline a caller needs for one occupant: pick the
//! goal cells for the requested target kind, search under the live hazard
//! mask, thin the route, and project the waypoints to geographic coordinates.

use super::projection::{GeoAnchors, GeoPoint};
use super::search::{find_path, Path};
use super::simplify::simplify;
use crate::error::{FireflyError, Result};
use crate::grid::{Coordinate, FloorPlan, GridShape, HazardMask, Marker};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A computed route. All three sequences are empty when no target is reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Every cell visited, entry to target inclusive.
    pub cells: Path,
    /// `cells` after simplification (or a copy of it when disabled).
    pub waypoints: Vec<Coordinate>,
    /// `waypoints` projected to longitude/latitude.
    pub geo: Vec<GeoPoint>,
}

impl Route {
    /// True when no target could be reached.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves along the raw route.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Reached target cell, if any.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.cells.last().copied()
    }
}

/// Routing pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Router {
    pub anchors: GeoAnchors,
    /// Collapse straight runs before projecting.
    pub simplify: bool,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            anchors: GeoAnchors::default(),
            simplify: true,
        }
    }
}

impl Router {
    #[must_use]
    pub fn new(anchors: GeoAnchors) -> Self {
        Self {
            anchors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Route from `entry` to the nearest `target` marker on `plan`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the plan has no markers of the requested kind, the
    ///   hazard mask does not match the plan, or `entry` is outside the grid
    /// * `UnsafeEntry` - `entry` is a wall or is burning
    pub fn route(
        &self,
        plan: &FloorPlan,
        target: Marker,
        entry: Coordinate,
        hazard: Option<&HazardMask>,
    ) -> Result<Route> {
        let goals = plan.targets(target);
        if goals.is_empty() {
            return Err(FireflyError::invalid_input(format!(
                "floor plan has no {} markers",
                target.name()
            )));
        }

        let cells = find_path(&plan.grid, goals, entry, hazard)?;
        let route = self.finish(cells, plan.grid.shape());
        match route.destination() {
            Some(dest) => info!(
                "Routed {} -> {} at {} ({} hops, {} waypoints)",
                entry,
                target.name(),
                dest,
                route.hops(),
                route.waypoints.len()
            ),
            None => info!("No safe route from {} to any {}", entry, target.name()),
        }
        Ok(route)
    }

    /// Route to an explicit goal list on an already-classified grid.
    ///
    /// # Errors
    ///
    /// Same as [`find_path`].
    pub fn route_to(
        &self,
        plan: &FloorPlan,
        goals: &[Coordinate],
        entry: Coordinate,
        hazard: Option<&HazardMask>,
    ) -> Result<Route> {
        let cells = find_path(&plan.grid, goals, entry, hazard)?;
        Ok(self.finish(cells, plan.grid.shape()))
    }

    fn finish(&self, cells: Path, shape: GridShape) -> Route {
        let waypoints = if self.simplify {
            simplify(&cells)
        } else {
            cells.clone()
        };
        let geo = self.anchors.project_path(&waypoints, shape);
        Route {
            cells,
            waypoints,
            geo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{classify_grid, CellGrid};

    fn plan() -> FloorPlan {
        // Corridor along row 1 with an exit at the east end and a kit mid-way
        let raw = CellGrid::from_rows(vec![
            vec![0, 0, 0, 0, 0, 0],
            vec![1, 1, 1, 3, 1, 2],
            vec![0, 0, 0, 0, 0, 0],
        ])
        .unwrap();
        classify_grid(&raw)
    }

    #[test]
    fn test_route_to_exit_simplifies_corridor() {
        let plan = plan();
        let route = Router::default()
            .route(&plan, Marker::FireExit, Coordinate::new(1, 0), None)
            .unwrap();
        assert_eq!(route.hops(), 5);
        assert_eq!(route.destination(), Some(Coordinate::new(1, 5)));
        assert_eq!(
            route.waypoints,
            vec![Coordinate::new(1, 0), Coordinate::new(1, 5)]
        );
        assert_eq!(route.geo.len(), 2);
    }

    #[test]
    fn test_route_without_simplify_keeps_every_cell() {
        let plan = plan();
        let route = Router::default()
            .with_simplify(false)
            .route(&plan, Marker::MedKit, Coordinate::new(1, 0), None)
            .unwrap();
        assert_eq!(route.cells, route.waypoints);
        assert_eq!(route.geo.len(), 4);
    }

    #[test]
    fn test_fire_blocking_corridor_is_unreachable() {
        let plan = plan();
        let mut mask = HazardMask::clear(plan.grid.shape());
        mask.ignite(Coordinate::new(1, 2));
        let route = Router::default()
            .route(&plan, Marker::FireExit, Coordinate::new(1, 0), Some(&mask))
            .unwrap();
        assert!(route.is_unreachable());
        assert!(route.waypoints.is_empty());
        assert!(route.geo.is_empty());
    }

    #[test]
    fn test_route_to_explicit_goals() {
        let plan = plan();
        let route = Router::default()
            .route_to(&plan, &[Coordinate::new(1, 2)], Coordinate::new(1, 5), None)
            .unwrap();
        assert_eq!(route.hops(), 3);
        assert_eq!(route.destination(), Some(Coordinate::new(1, 2)));
        assert_eq!(
            route.waypoints,
            vec![Coordinate::new(1, 5), Coordinate::new(1, 2)]
        );

        let err = Router::default()
            .route_to(&plan, &[], Coordinate::new(1, 5), None)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_missing_target_kind_is_invalid() {
        let plan = plan();
        let err = Router::default()
            .route(&plan, Marker::Extinguisher, Coordinate::new(1, 0), None)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
