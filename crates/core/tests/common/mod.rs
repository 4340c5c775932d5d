//! Shared fixtures for integration tests

use firefly_core::{classify_grid, CellGrid, FloorPlan};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Two rooms joined by a doorway, with an exit in the east room and a kit in
/// the west room.
///
/// ```text
///   0 0 0 0 0 0 0 0 0
///   0 1 1 1 0 1 1 1 0
///   0 1 3 1 1 1 1 2 0
///   0 1 1 1 0 1 1 1 0
///   0 0 0 0 0 0 0 0 0
/// ```
pub fn two_rooms() -> FloorPlan {
    let raw = CellGrid::from_rows(vec![
        vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 1, 1, 1, 0, 1, 1, 1, 0],
        vec![0, 1, 3, 1, 1, 1, 1, 2, 0],
        vec![0, 1, 1, 1, 0, 1, 1, 1, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
    ])
    .unwrap();
    classify_grid(&raw)
}
