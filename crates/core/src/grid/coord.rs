//! Cell coordinates and grid shapes
//!
//! Coordinates are signed so that neighbour offsets can step off the grid and be
//! rejected by a bounds check instead of wrapping. All grids in this crate store
//! their cells as a flat `Vec` in row-major order (`row * cols + col`), and
//! [`GridShape`] owns the conversion between the two representations.

use crate::error::{FireflyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight moves of the 8-connected neighbourhood in fixed compass order:
/// W, E, N, S, NW, SE, NE, SW.
///
/// Search expands neighbours in exactly this order, which fixes tie-breaking
/// between equally short routes.
pub const COMPASS_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
];

/// A grid cell identified by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Coordinate displaced by `(d_row, d_col)`. May leave the grid.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(c: Coordinate) -> Self {
        (c.row, c.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// True when the shape has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `coord` lies inside the grid. Negative indices are never inside.
    #[must_use]
    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }

    /// Flat row-major index of `coord`, or `None` if it is out of bounds.
    #[must_use]
    pub fn index(&self, coord: Coordinate) -> Option<usize> {
        self.contains(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }

    /// Coordinate for a flat row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`GridShape::len`].
    #[must_use]
    pub fn coord(&self, index: usize) -> Coordinate {
        assert!(index < self.len(), "Index out of bounds");
        Coordinate::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    /// In-bounds 8-connected neighbours of `coord` in [`COMPASS_OFFSETS`] order,
    /// paired with their flat indices.
    pub fn neighbours(&self, coord: Coordinate) -> impl Iterator<Item = (Coordinate, usize)> + '_ {
        COMPASS_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let next = coord.offset(dr, dc);
            self.index(next).map(|index| (next, index))
        })
    }

    /// Reject zero-area shapes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either dimension is zero or the shape does not fit
    /// the signed coordinate range.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(FireflyError::invalid_input(format!(
                "grid shape {self} has no cells"
            )));
        }
        if i32::try_from(self.rows).is_err() || i32::try_from(self.cols).is_err() {
            return Err(FireflyError::invalid_input(format!(
                "grid shape {self} exceeds the coordinate range"
            )));
        }
        Ok(())
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl From<GridShape> for (usize, usize) {
    fn from(s: GridShape) -> Self {
        (s.rows, s.cols)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Flatten nested rows into a row-major buffer, checking that the result is a
/// non-empty rectangle.
pub(crate) fn flatten_rows<T: Copy>(rows: Vec<Vec<T>>, what: &str) -> Result<(GridShape, Vec<T>)> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    let shape = GridShape::new(n_rows, n_cols);
    if shape.is_empty() {
        return Err(FireflyError::invalid_input(format!("{what} is empty")));
    }
    shape.validate()?;

    let mut cells = Vec::with_capacity(shape.len());
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != n_cols {
            return Err(FireflyError::invalid_input(format!(
                "{what} is not rectangular: row {i} has {} cells, expected {n_cols}",
                row.len()
            )));
        }
        cells.extend(row);
    }
    Ok((shape, cells))
}

/// Split a row-major buffer back into nested rows.
pub(crate) fn to_nested<T: Copy>(shape: GridShape, cells: &[T]) -> Vec<Vec<T>> {
    cells.chunks(shape.cols.max(1)).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_is_row_major() {
        let shape = GridShape::new(3, 4);
        let c = Coordinate::new(2, 1);
        let index = shape.index(c).unwrap();
        assert_eq!(index, 2 * 4 + 1);
        assert_eq!(shape.coord(index), c);
    }

    #[test]
    fn test_contains_rejects_negative_and_overflowing_indices() {
        let shape = GridShape::new(2, 2);
        assert!(shape.contains(Coordinate::new(1, 1)));
        assert!(!shape.contains(Coordinate::new(-1, 0)));
        assert!(!shape.contains(Coordinate::new(0, -1)));
        assert!(!shape.contains(Coordinate::new(2, 0)));
        assert!(!shape.contains(Coordinate::new(0, 2)));
        assert_eq!(shape.index(Coordinate::new(0, 2)), None);
    }

    #[test]
    fn test_neighbours_follow_compass_order_and_clip() {
        let shape = GridShape::new(3, 3);
        let all: Vec<Coordinate> = shape
            .neighbours(Coordinate::new(1, 1))
            .map(|(c, _)| c)
            .collect();
        assert_eq!(
            all,
            vec![
                Coordinate::new(1, 0),
                Coordinate::new(1, 2),
                Coordinate::new(0, 1),
                Coordinate::new(2, 1),
                Coordinate::new(0, 0),
                Coordinate::new(2, 2),
                Coordinate::new(0, 2),
                Coordinate::new(2, 0),
            ]
        );

        // Corner cell only has three neighbours
        assert_eq!(shape.neighbours(Coordinate::new(0, 0)).count(), 3);
    }

    #[test]
    fn test_flatten_rejects_ragged_and_empty_rows() {
        assert!(flatten_rows::<i32>(vec![], "grid").is_err());
        assert!(flatten_rows::<i32>(vec![vec![]], "grid").is_err());
        let err = flatten_rows(vec![vec![1, 1], vec![1]], "grid").unwrap_err();
        assert!(err.to_string().contains("not rectangular"));

        let (shape, cells) = flatten_rows(vec![vec![1, 2], vec![3, 4]], "grid").unwrap();
        assert_eq!(shape, GridShape::new(2, 2));
        assert_eq!(cells, vec![1, 2, 3, 4]);
        assert_eq!(to_nested(shape, &cells), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let json = serde_json::to_string(&Coordinate::new(3, 25)).unwrap();
        assert_eq!(json, "[3,25]");
        let back: Coordinate = serde_json::from_str("[4,7]").unwrap();
        assert_eq!(back, Coordinate::new(4, 7));
    }
}
