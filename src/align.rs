//! Grid alignment for static geometry, so neighbouring walls and panels never
//! land on fractional pixels.

/// Default grid cell, in pixels.
pub const GRID_ALIGN_CELL: f32 = 10.0;

/// Round `coord` down to the nearest multiple of `cell`.
pub fn align(coord: f32, cell: f32) -> i32 {
    ((coord / cell).floor() * cell) as i32
}

/// `align` with the default cell.
pub fn align_to_grid(coord: f32) -> i32 {
    align(coord, GRID_ALIGN_CELL)
}
