use firefly_core::find_path;
use std::ptr;

use crate::error::{DefaultFfiError, FireflyErrorCode};
use crate::helpers::{coords_from_raw, grid_from_raw, mask_from_raw, raw_shape, track_error, track_result};
use crate::types::{FireflyCoord, FireflyPath};

/// Find the shortest safe route from `entry` to the nearest goal.
///
/// Parameters
/// - `cells`: row-major `rows * cols` cell codes; only `0` (wall) blocks movement
/// - `goals`: `goal_count` destination cells
/// - `entry`: starting cell
/// - `fire`: row-major `rows * cols` bytes, `1` = burning; may be null
/// - `out_path`: receives the route; `{NULL, 0}` when no goal is reachable
///
/// Returns
/// - `FireflyErrorCode::Ok` - `out_path` is set (possibly empty)
/// - `FireflyErrorCode::NullPointer` - `cells`, `goals` or `out_path` is null
/// - `FireflyErrorCode::InvalidInput` - bad dimensions, empty goal set, bad
///   fire values, or `entry` outside the grid
/// - `FireflyErrorCode::UnsafeEntry` - `entry` is a wall or burning
///
/// # Safety
/// - `cells` (and `fire` when non-null) must point to `rows * cols` readable elements.
/// - `goals` must point to `goal_count` readable `FireflyCoord`s.
/// - `out_path` must be a valid, non-null pointer to writable memory.
/// - A non-empty result must be released exactly once with `firefly_path_free`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn firefly_find_path(
    cells: *const i32,
    rows: usize,
    cols: usize,
    goals: *const FireflyCoord,
    goal_count: usize,
    entry: FireflyCoord,
    fire: *const u8,
    out_path: *mut FireflyPath,
) -> FireflyErrorCode {
    if out_path.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_path"));
    }

    let result = (|| {
        let shape = raw_shape(rows, cols)?;
        // SAFETY: buffer sizes are part of the caller contract
        let grid = unsafe { grid_from_raw(cells, shape)? };
        let hazard = unsafe { mask_from_raw(fire, shape)? };
        let goals = unsafe { coords_from_raw(goals, goal_count)? };
        let path = find_path(&grid, &goals, entry.into(), hazard.as_ref())?;
        Ok::<_, DefaultFfiError>(path)
    })();

    match track_result(result) {
        Ok(path) => {
            unsafe {
                *out_path = FireflyPath::from_cells(&path);
            }
            FireflyErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_path = FireflyPath::empty();
            }
            code
        }
    }
}

/// Release a route returned by `firefly_find_path`.
///
/// Empty routes (`coords` null) are a no-op.
///
/// # Safety
/// - `path` must come from `firefly_find_path` and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn firefly_path_free(path: FireflyPath) {
    if path.coords.is_null() {
        return;
    }
    // SAFETY: allocated as a boxed slice of `len` elements in `FireflyPath::from_cells`
    unsafe {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(path.coords, path.len)));
    }
}
