use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, FireflyErrorCode};
use crate::types::FireflyCoord;
use firefly_core::{CellGrid, Coordinate, GridShape, HazardMask};
use std::ffi::CString;
use std::slice;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> FireflyErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireflyErrorCode::Ok;
    });
}

/// Record the outcome of `result`: clear on success, store the error on failure.
pub(crate) fn track_result<T>(result: Result<T, DefaultFfiError>) -> Result<T, FireflyErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Rows-by-cols shape for raw buffers, checking the cell count fits `usize`.
pub(crate) fn raw_shape(rows: usize, cols: usize) -> Result<GridShape, DefaultFfiError> {
    if rows.checked_mul(cols).is_none() {
        return Err(DefaultFfiError::invalid_input(format!(
            "grid {rows}x{cols} is too large"
        )));
    }
    let shape = GridShape::new(rows, cols);
    shape.validate()?;
    Ok(shape)
}

/// Copy a row-major cell buffer into a `CellGrid`.
///
/// # Safety
/// `cells` must be null or point to `shape.len()` readable `i32`s.
pub(crate) unsafe fn grid_from_raw(cells: *const i32, shape: GridShape) -> Result<CellGrid, DefaultFfiError> {
    if cells.is_null() {
        return Err(DefaultFfiError::null_pointer("cells"));
    }
    // SAFETY: non-null and sized by the caller contract
    let values = unsafe { slice::from_raw_parts(cells, shape.len()) };
    Ok(CellGrid::from_cells(shape, values.to_vec())?)
}

/// Copy an optional row-major 0/1 buffer into a `HazardMask`; null means no fire.
///
/// # Safety
/// `fire` must be null or point to `shape.len()` readable bytes.
pub(crate) unsafe fn mask_from_raw(fire: *const u8, shape: GridShape) -> Result<Option<HazardMask>, DefaultFfiError> {
    if fire.is_null() {
        return Ok(None);
    }
    // SAFETY: non-null and sized by the caller contract
    let values = unsafe { slice::from_raw_parts(fire, shape.len()) };
    Ok(Some(HazardMask::from_cells(shape, values.to_vec())?))
}

/// Borrow `count` coordinates from a caller buffer.
///
/// # Safety
/// `coords` must be null or point to `count` readable `FireflyCoord`s.
pub(crate) unsafe fn coords_from_raw(coords: *const FireflyCoord, count: usize) -> Result<Vec<Coordinate>, DefaultFfiError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if coords.is_null() {
        return Err(DefaultFfiError::null_pointer("goals"));
    }
    // SAFETY: non-null and sized by the caller contract
    let raw = unsafe { slice::from_raw_parts(coords, count) };
    Ok(raw.iter().map(|&c| c.into()).collect())
}
