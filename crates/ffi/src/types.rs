use firefly_core::{Coordinate, GeoPoint, NeighbourCounting, SpreadParams};

/// Grid cell as (row, col).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireflyCoord {
    pub row: i32,
    pub col: i32,
}

impl From<FireflyCoord> for Coordinate {
    fn from(c: FireflyCoord) -> Self {
        Coordinate::new(c.row, c.col)
    }
}

impl From<Coordinate> for FireflyCoord {
    fn from(c: Coordinate) -> Self {
        Self {
            row: c.row,
            col: c.col,
        }
    }
}

/// Geographic point in degrees.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireflyGeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl From<GeoPoint> for FireflyGeoPoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            lon: p.lon,
            lat: p.lat,
        }
    }
}

/// Owned route returned by `firefly_find_path`.
///
/// `coords` is null and `len` is 0 when no goal is reachable.
/// Release with `firefly_path_free`.
#[repr(C)]
#[derive(Debug)]
pub struct FireflyPath {
    pub coords: *mut FireflyCoord,
    pub len: usize,
}

impl FireflyPath {
    pub(crate) fn empty() -> Self {
        Self {
            coords: std::ptr::null_mut(),
            len: 0,
        }
    }

    pub(crate) fn from_cells(cells: &[Coordinate]) -> Self {
        if cells.is_empty() {
            return Self::empty();
        }
        let boxed: Box<[FireflyCoord]> = cells.iter().map(|&c| c.into()).collect();
        let len = boxed.len();
        Self {
            coords: Box::into_raw(boxed).cast::<FireflyCoord>(),
            len,
        }
    }
}

/// Spread parameters for `firefly_sim_new`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireflySpreadParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Count burning cells of the inner 3x3 box once instead of twice.
    pub exclusive_counting: bool,
}

impl Default for FireflySpreadParams {
    fn default() -> Self {
        let params = SpreadParams::default();
        Self {
            alpha: params.alpha,
            beta: params.beta,
            gamma: params.gamma,
            exclusive_counting: false,
        }
    }
}

impl From<FireflySpreadParams> for SpreadParams {
    fn from(p: FireflySpreadParams) -> Self {
        let counting = if p.exclusive_counting {
            NeighbourCounting::Exclusive
        } else {
            NeighbourCounting::Reference
        };
        SpreadParams::new(p.alpha, p.beta, p.gamma).with_counting(counting)
    }
}
