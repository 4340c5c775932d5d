//! ASCII rendering of grids, fire and routes
//!
//! `#` wall, `.` walkable, `?` unknown, `E` exit, `M` medical kit,
//! `X` extinguisher, `*` burning, `o` route. Later layers win.

use firefly_core::grid::{EXTINGUISHER, FIRE_EXIT, MED_KIT, UNKNOWN, WALL};
use firefly_core::{CellGrid, Coordinate, GridShape, HazardMask};

fn cell_char(code: i32) -> char {
    match code {
        WALL => '#',
        FIRE_EXIT => 'E',
        MED_KIT => 'M',
        EXTINGUISHER => 'X',
        UNKNOWN => '?',
        _ => '.',
    }
}

/// Draw `shape` with optional floor map, fire and route overlays.
pub fn render(
    shape: GridShape,
    floor: Option<&CellGrid>,
    fire: Option<&HazardMask>,
    route: &[Coordinate],
) -> String {
    let mut canvas: Vec<Vec<char>> = (0..shape.rows)
        .map(|row| {
            (0..shape.cols)
                .map(|col| {
                    let coord = Coordinate::new(row as i32, col as i32);
                    floor.and_then(|f| f.get(coord)).map_or('.', cell_char)
                })
                .collect()
        })
        .collect();

    if let Some(fire) = fire {
        for cell in fire.burning_cells() {
            canvas[cell.row as usize][cell.col as usize] = '*';
        }
    }
    for cell in route {
        if shape.contains(*cell) {
            canvas[cell.row as usize][cell.col as usize] = 'o';
        }
    }

    let mut out = String::with_capacity(shape.rows * (shape.cols + 1));
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}
