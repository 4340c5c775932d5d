//! Evacuation routing over classified floor plans

mod common;

use firefly_core::{
    find_path, is_safe, project, CellGrid, Coordinate, FireflyError, HazardMask, Marker, Router,
};

fn chebyshev(a: Coordinate, b: Coordinate) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

#[test]
fn test_route_crosses_doorway_to_exit() {
    let plan = common::two_rooms();
    let route = Router::default()
        .route(&plan, Marker::FireExit, Coordinate::new(2, 1), None)
        .unwrap();

    assert_eq!(route.hops(), 6);
    assert!(route.cells.contains(&Coordinate::new(2, 4)));
    assert_eq!(route.destination(), Some(Coordinate::new(2, 7)));
    assert_eq!(route.waypoints.first(), Some(&Coordinate::new(2, 1)));
    assert_eq!(route.waypoints.last(), Some(&Coordinate::new(2, 7)));
    assert_eq!(route.geo.len(), route.waypoints.len());
    assert_eq!(route.geo[0], project(Coordinate::new(2, 1), plan.grid.shape()));
}

#[test]
fn test_every_step_is_one_safe_move() {
    let plan = common::two_rooms();
    let mut mask = HazardMask::clear(plan.grid.shape());
    mask.ignite(Coordinate::new(2, 5));

    let path = find_path(&plan.grid, &plan.fire_exits, Coordinate::new(3, 1), Some(&mask)).unwrap();
    assert_eq!(path.len(), 7);
    for pair in path.windows(2) {
        assert_eq!(chebyshev(pair[0], pair[1]), 1);
    }
    for &cell in &path {
        assert!(is_safe(&plan.grid, cell, Some(&mask)), "unsafe cell {cell}");
    }
}

#[test]
fn test_burning_doorway_cuts_off_exit_but_not_kit() {
    let plan = common::two_rooms();
    let mut mask = HazardMask::clear(plan.grid.shape());
    mask.ignite(Coordinate::new(2, 4));
    let router = Router::default();
    let entry = Coordinate::new(1, 1);

    let to_exit = router.route(&plan, Marker::FireExit, entry, Some(&mask)).unwrap();
    assert!(to_exit.is_unreachable());

    let to_kit = router.route(&plan, Marker::MedKit, entry, Some(&mask)).unwrap();
    assert_eq!(to_kit.destination(), Some(Coordinate::new(2, 2)));
    assert_eq!(to_kit.hops(), 1);
}

#[test]
fn test_unsafe_entry_reported() {
    let plan = common::two_rooms();
    let wall = Coordinate::new(0, 0);
    assert_eq!(
        find_path(&plan.grid, &plan.fire_exits, wall, None),
        Err(FireflyError::UnsafeEntry { entry: wall })
    );

    let mut mask = HazardMask::clear(plan.grid.shape());
    let entry = Coordinate::new(2, 6);
    mask.ignite(entry);
    assert!(matches!(
        find_path(&plan.grid, &plan.fire_exits, entry, Some(&mask)),
        Err(FireflyError::UnsafeEntry { .. })
    ));
}

#[test]
fn test_entry_on_exit_is_single_cell_route() {
    let plan = common::two_rooms();
    let exit = plan.fire_exits[0];
    let route = Router::default().route(&plan, Marker::FireExit, exit, None).unwrap();
    assert_eq!(route.cells, vec![exit]);
    assert_eq!(route.hops(), 0);
}

#[test]
fn test_floor_plan_from_json_rows() {
    let raw: CellGrid = serde_json::from_str("[[1,1,1],[0,0,1],[4,1,1]]").unwrap();
    let plan = firefly_core::classify_grid(&raw);
    assert_eq!(plan.extinguishers, vec![Coordinate::new(2, 0)]);

    let path = find_path(&plan.grid, &plan.extinguishers, Coordinate::new(0, 0), None).unwrap();
    // Around the wall through column 2
    assert_eq!(path.len(), 5);
    assert_eq!(path.last(), Some(&Coordinate::new(2, 0)));
}
