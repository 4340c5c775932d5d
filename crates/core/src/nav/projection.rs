//! Grid-to-geographic projection
//!
//! Maps cell indices onto longitude/latitude by linear interpolation between
//! two anchor corners of the building footprint. Assumes the grid covers an
//! axis-aligned rectangle with no rotation and no map-projection distortion,
//! which holds for building-scale footprints.

use crate::grid::{Coordinate, GridShape};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Planar vector in (longitude, latitude) degrees.
pub type Vec2 = Vector2<f64>;

/// A geographic point, serialized as `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    fn as_vec(self) -> Vec2 {
        Vec2::new(self.lon, self.lat)
    }

    fn from_vec(v: Vec2) -> Self {
        Self { lon: v.x, lat: v.y }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lon, p.lat)
    }
}

/// The two corners the grid is pinned to.
///
/// Row 0 / column 0 sits on `top_left`; row `rows` / column `cols` (one past
/// the last cell) sits on `bottom_right`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoAnchors {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
}

impl Default for GeoAnchors {
    /// Corners of the reference building footprint.
    fn default() -> Self {
        Self {
            top_left: GeoPoint::new(77.184_647_827_908_8, 28.631_081_792_092_175),
            bottom_right: GeoPoint::new(77.193_169_065_054_97, 28.622_942_618_204_192),
        }
    }
}

impl GeoAnchors {
    #[must_use]
    pub const fn new(top_left: GeoPoint, bottom_right: GeoPoint) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Degrees per cell: x is longitude per column, y is latitude per row.
    ///
    /// Latitude decreases southward, so y is the positive drop per row.
    #[must_use]
    pub fn cell_size(&self, shape: GridShape) -> Vec2 {
        Vec2::new(
            (self.bottom_right.lon - self.top_left.lon) / shape.cols as f64,
            (self.top_left.lat - self.bottom_right.lat) / shape.rows as f64,
        )
    }

    /// Project a cell coordinate onto the anchored rectangle.
    ///
    /// Pure arithmetic: coordinates outside the grid extrapolate linearly.
    #[must_use]
    pub fn project(&self, coord: Coordinate, shape: GridShape) -> GeoPoint {
        let step = self.cell_size(shape);
        let offset = Vec2::new(
            f64::from(coord.col) * step.x,
            -(f64::from(coord.row) * step.y),
        );
        GeoPoint::from_vec(self.top_left.as_vec() + offset)
    }

    /// Project every point of a path.
    #[must_use]
    pub fn project_path(&self, path: &[Coordinate], shape: GridShape) -> Vec<GeoPoint> {
        path.iter().map(|&c| self.project(c, shape)).collect()
    }
}

/// Project `coord` using the default anchors.
#[must_use]
pub fn project(coord: Coordinate, shape: GridShape) -> GeoPoint {
    GeoAnchors::default().project(coord, shape)
}
