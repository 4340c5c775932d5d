use firefly_core::project;

use crate::helpers::{clear_last_error, raw_shape, track_error};
use crate::types::{FireflyCoord, FireflyGeoPoint};

/// Project a cell onto longitude/latitude using the default building anchors.
///
/// Returns `{NaN, NaN}` and records `InvalidInput` if `rows` or `cols` is zero.
#[no_mangle]
pub extern "C" fn firefly_project(coord: FireflyCoord, rows: usize, cols: usize) -> FireflyGeoPoint {
    match raw_shape(rows, cols) {
        Ok(shape) => {
            clear_last_error();
            project(coord.into(), shape).into()
        }
        Err(error) => {
            track_error(&error);
            FireflyGeoPoint {
                lon: f64::NAN,
                lat: f64::NAN,
            }
        }
    }
}

