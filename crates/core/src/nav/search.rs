//! Hazard-aware breadth-first path search
//!
//! Searches the 8-connected cell graph from an entry cell to the nearest member
//! of a goal set. Every move, orthogonal or diagonal, costs one hop, so the
//! result is a minimum-hop route rather than a Euclidean shortest path.
//!
//! # Storage
//!
//! Visited flags, parent links, and goal membership live in flat arrays indexed
//! by row-major cell index. Lookups are O(1) without hashing, and all working
//! state is owned by a single call, so independent searches can run on separate
//! threads.
//!
//! # Hazards
//!
//! The hazard mask is a frozen snapshot: the fire does not advance while the
//! search runs.

use super::safety::is_safe;
use crate::error::{FireflyError, Result};
use crate::grid::{CellGrid, Coordinate, GridShape, HazardMask};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Parent sentinel for the entry cell and undiscovered cells.
const NO_PARENT: usize = usize::MAX;

/// Ordered cells from entry to goal, both inclusive.
pub type Path = Vec<Coordinate>;

/// Goal cells as a membership bitmap over one grid shape.
#[derive(Debug, Clone)]
pub struct GoalSet {
    shape: GridShape,
    members: Vec<bool>,
    len: usize,
}

impl GoalSet {
    /// Build a goal set for `shape`. Goals outside the grid can never be reached
    /// and are dropped.
    #[must_use]
    pub fn new(shape: GridShape, goals: &[Coordinate]) -> Self {
        let mut members = vec![false; shape.len()];
        let mut len = 0;
        for &goal in goals {
            match shape.index(goal) {
                Some(i) if !members[i] => {
                    members[i] = true;
                    len += 1;
                }
                Some(_) => {}
                None => warn!("Ignoring goal {} outside grid {}", goal, shape),
            }
        }
        Self {
            shape,
            members,
            len,
        }
    }

    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.shape.index(coord).is_some_and(|i| self.members[i])
    }

    #[inline]
    fn contains_index(&self, index: usize) -> bool {
        self.members[index]
    }

    /// Number of distinct in-bounds goals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Find the shortest safe route from `entry` to the nearest goal.
///
/// Returns an empty path when no goal is reachable. If `entry` is itself a goal
/// the path is `[entry]`.
///
/// # Arguments
///
/// * `grid` - Occupancy grid; only wall cells block movement
/// * `goals` - Acceptable destinations
/// * `entry` - Starting cell
/// * `hazard` - Burning cells to avoid; `None` means nothing is burning
///
/// # Errors
///
/// * `InvalidInput` - `goals` is empty, `hazard` has a different shape than
///   `grid`, or `entry` is outside the grid
/// * `UnsafeEntry` - `entry` is a wall or is burning
pub fn find_path(
    grid: &CellGrid,
    goals: &[Coordinate],
    entry: Coordinate,
    hazard: Option<&HazardMask>,
) -> Result<Path> {
    let shape = grid.shape();
    if goals.is_empty() {
        return Err(FireflyError::invalid_input("goal set is empty"));
    }
    if let Some(mask) = hazard {
        if mask.shape() != shape {
            return Err(FireflyError::shape_mismatch("hazard mask", shape, mask.shape()));
        }
    }
    if !shape.contains(entry) {
        return Err(FireflyError::out_of_bounds("entry", entry, shape));
    }
    if !is_safe(grid, entry, hazard) {
        return Err(FireflyError::UnsafeEntry { entry });
    }

    let goal_set = GoalSet::new(shape, goals);
    Ok(breadth_first(grid, &goal_set, entry, hazard))
}

/// BFS from a validated, safe entry cell.
fn breadth_first(
    grid: &CellGrid,
    goals: &GoalSet,
    entry: Coordinate,
    hazard: Option<&HazardMask>,
) -> Path {
    let shape = grid.shape();
    let Some(start) = shape.index(entry) else {
        return Vec::new();
    };

    let mut visited = vec![false; shape.len()];
    let mut parent = vec![NO_PARENT; shape.len()];
    let mut frontier = VecDeque::new();
    visited[start] = true;
    frontier.push_back(start);

    let mut expanded = 0usize;
    let mut reached = None;
    while let Some(current) = frontier.pop_front() {
        if goals.contains_index(current) {
            reached = Some(current);
            break;
        }
        expanded += 1;

        for (next, index) in shape.neighbours(shape.coord(current)) {
            if !visited[index] && is_safe(grid, next, hazard) {
                visited[index] = true;
                parent[index] = current;
                frontier.push_back(index);
            }
        }
    }

    match reached {
        Some(goal) => {
            let path = reconstruct(shape, &parent, goal);
            debug!(
                "Path from {} reached {} in {} hops ({} cells expanded)",
                entry,
                shape.coord(goal),
                path.len() - 1,
                expanded
            );
            path
        }
        None => {
            debug!(
                "No goal reachable from {} ({} cells expanded)",
                entry, expanded
            );
            Vec::new()
        }
    }
}

/// Walk parent links back from `goal` and return the route in travel order.
fn reconstruct(shape: GridShape, parent: &[usize], goal: usize) -> Path {
    let mut path = Vec::new();
    let mut cursor = goal;
    loop {
        path.push(shape.coord(cursor));
        match parent[cursor] {
            NO_PARENT => break,
            previous => cursor = previous,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{GridShape, WALKABLE};

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn open(rows: usize, cols: usize) -> CellGrid {
        CellGrid::filled(GridShape::new(rows, cols), WALKABLE)
    }

    fn assert_connected(path: &[Coordinate]) {
        for pair in path.windows(2) {
            let dr = (pair[1].row - pair[0].row).abs();
            let dc = (pair[1].col - pair[0].col).abs();
            assert!(dr <= 1 && dc <= 1 && (dr, dc) != (0, 0), "bad step {:?}", pair);
        }
    }

    #[test]
    fn test_diagonal_single_hop() {
        let path = find_path(&open(3, 3), &[c(0, 0)], c(1, 1), None).unwrap();
        assert_eq!(path, vec![c(1, 1), c(0, 0)]);
    }

    #[test]
    fn test_entry_on_goal() {
        let path = find_path(&open(3, 3), &[c(2, 2), c(1, 1)], c(1, 1), None).unwrap();
        assert_eq!(path, vec![c(1, 1)]);
    }

    #[test]
    fn test_routes_around_fire() {
        let grid = open(3, 3);
        let mut mask = HazardMask::clear(grid.shape());
        mask.ignite(c(1, 1));

        let path = find_path(&grid, &[c(2, 2)], c(0, 0), Some(&mask)).unwrap();
        assert_eq!(path.len(), 4, "three hops expected: {:?}", path);
        assert_eq!(path.first(), Some(&c(0, 0)));
        assert_eq!(path.last(), Some(&c(2, 2)));
        assert!(!path.contains(&c(1, 1)));
        assert_connected(&path);
        // Compass order explores W, E, N, S first, so the east side wins the tie
        assert_eq!(path, vec![c(0, 0), c(0, 1), c(1, 2), c(2, 2)]);
    }

    #[test]
    fn test_enclosed_entry_is_unreachable() {
        let grid = CellGrid::from_rows(vec![
            vec![1, 1, 1, 1, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 0, 1, 0, 1],
            vec![1, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap();
        let path = find_path(&grid, &[c(0, 0)], c(2, 2), None).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_nearest_of_several_goals() {
        let grid = open(1, 10);
        let path = find_path(&grid, &[c(0, 0), c(0, 9)], c(0, 6), None).unwrap();
        assert_eq!(path.last(), Some(&c(0, 9)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_hop_count_is_chebyshev_on_open_grid() {
        let grid = open(7, 9);
        let entry = c(3, 4);
        for row in 0..7 {
            for col in 0..9 {
                let goal = c(row, col);
                let path = find_path(&grid, &[goal], entry, None).unwrap();
                let expected = (row - entry.row).abs().max((col - entry.col).abs()) as usize;
                assert_eq!(path.len() - 1, expected, "goal {}", goal);
                assert_connected(&path);
            }
        }
    }

    #[test]
    fn test_walls_force_detour() {
        // Wall column with a single gap at the bottom
        let grid = CellGrid::from_rows(vec![
            vec![1, 0, 1],
            vec![1, 0, 1],
            vec![1, 1, 1],
        ])
        .unwrap();
        let path = find_path(&grid, &[c(0, 2)], c(0, 0), None).unwrap();
        assert_eq!(path.len(), 5);
        assert!(path.iter().all(|&p| grid.is_open(p)));
        assert_connected(&path);
    }

    #[test]
    fn test_unsafe_entry_is_an_error() {
        let grid = CellGrid::from_rows(vec![vec![0, 1], vec![1, 1]]).unwrap();
        let err = find_path(&grid, &[c(1, 1)], c(0, 0), None).unwrap_err();
        assert_eq!(err, FireflyError::UnsafeEntry { entry: c(0, 0) });

        let mut mask = HazardMask::clear(grid.shape());
        mask.ignite(c(0, 1));
        let err = find_path(&grid, &[c(1, 1)], c(0, 1), Some(&mask)).unwrap_err();
        assert_eq!(err, FireflyError::UnsafeEntry { entry: c(0, 1) });
    }

    #[test]
    fn test_malformed_requests_are_invalid_input() {
        let grid = open(3, 3);
        assert!(find_path(&grid, &[], c(0, 0), None)
            .unwrap_err()
            .is_invalid_input());
        assert!(find_path(&grid, &[c(1, 1)], c(-1, 0), None)
            .unwrap_err()
            .is_invalid_input());
        let mask = HazardMask::clear(GridShape::new(2, 3));
        assert!(find_path(&grid, &[c(1, 1)], c(0, 0), Some(&mask))
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_goal_set_drops_out_of_bounds() {
        let set = GoalSet::new(GridShape::new(2, 2), &[c(0, 0), c(0, 0), c(5, 5)]);
        assert_eq!(set.len(), 1);
        assert!(set.contains(c(0, 0)));
        assert!(!set.contains(c(5, 5)));

        // Only unreachable goals: valid request, empty result
        let path = find_path(&open(2, 2), &[c(5, 5)], c(0, 0), None).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_burning_goal_is_not_reached() {
        let grid = open(1, 3);
        let mut mask = HazardMask::clear(grid.shape());
        mask.ignite(c(0, 2));
        let path = find_path(&grid, &[c(0, 2)], c(0, 0), Some(&mask)).unwrap();
        assert!(path.is_empty());
    }
}
