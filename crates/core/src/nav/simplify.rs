//! Waypoint thinning for rendered routes
//!
//! Drops interior points that sit in the middle of a straight horizontal or
//! vertical run. The result is lossy: it is meant to reduce waypoint density
//! before projection and rendering, not to produce a geometrically minimal
//! polyline. Diagonal runs are left alone.

use crate::grid::Coordinate;

/// Collapse straight horizontal and vertical runs to their endpoints.
///
/// Paths of three points or fewer are returned unchanged. The first and last
/// points are never removed.
#[must_use]
pub fn simplify(path: &[Coordinate]) -> Vec<Coordinate> {
    let mut points = path.to_vec();
    if points.len() <= 3 {
        return points;
    }

    // `i` is the leading point of the window (i-2, i-1, i); the middle one is the
    // removal candidate. Removing it pulls the next point into position `i`, so
    // the same window is re-tested until the run ends.
    let mut i = 2;
    while i < points.len() {
        while i < points.len() && same_row(&points[i - 2..=i]) {
            points.remove(i - 1);
        }
        while i < points.len() && same_col(&points[i - 2..=i]) {
            points.remove(i - 1);
        }
        i += 1;
    }
    points
}

fn same_row(window: &[Coordinate]) -> bool {
    window.iter().all(|p| p.row == window[0].row)
}

fn same_col(window: &[Coordinate]) -> bool {
    window.iter().all(|p| p.col == window[0].col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Coordinate> {
        raw.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn test_short_paths_unchanged() {
        let straight = pts(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(simplify(&straight), straight);
        assert!(simplify(&[]).is_empty());
    }

    #[test]
    fn test_horizontal_run_collapses_to_endpoints() {
        let run = pts(&[(4, 0), (4, 1), (4, 2), (4, 3), (4, 4)]);
        assert_eq!(simplify(&run), pts(&[(4, 0), (4, 4)]));
    }

    #[test]
    fn test_vertical_run_collapses_to_endpoints() {
        let run = pts(&[(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(simplify(&run), pts(&[(0, 2), (3, 2)]));
    }

    #[test]
    fn test_corner_kept() {
        // Along row 0, then down column 3
        let path = pts(&[(0, 0), (0, 1), (0, 2), (0, 3), (1, 3), (2, 3), (3, 3)]);
        assert_eq!(simplify(&path), pts(&[(0, 0), (0, 3), (3, 3)]));
    }

    #[test]
    fn test_diagonal_points_kept() {
        let path = pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(simplify(&path), path);
    }

    #[test]
    fn test_mixed_route_preserves_ends() {
        let path = pts(&[(5, 0), (5, 1), (4, 2), (3, 3), (3, 4), (3, 5), (2, 6)]);
        let out = simplify(&path);
        assert_eq!(out.first(), path.first());
        assert_eq!(out.last(), path.last());
        assert_eq!(out, pts(&[(5, 0), (5, 1), (4, 2), (3, 3), (3, 5), (2, 6)]));
    }
}
