//! Grid transforms
//!
//! Transforms work on decoded grids, never on CSEF text, and always return a
//! new grid. The result can be fed straight back into the encoder.

use crate::grid::{Cell, SpriteGrid};

/// Flip a grid left to right.
///
/// The result has the same width and height. A row shorter than the width is
/// padded with transparent cells on the right before it is reversed, so the
/// padding ends up on the left.
///
/// # Examples
///
/// ```
/// use csef::grid::SpriteGrid;
/// use csef::transforms::mirror_horizontal;
///
/// let grid = SpriteGrid::parse("AB.\nC..").unwrap();
/// assert_eq!(mirror_horizontal(&grid).to_string(), ".BA\n..C");
/// ```
pub fn mirror_horizontal(grid: &SpriteGrid) -> SpriteGrid {
    let width = grid.width();
    let rows = grid
        .rows()
        .iter()
        .map(|row| {
            let mut mirrored: Vec<Cell> = row.to_vec();
            if mirrored.len() < width {
                mirrored.resize(width, Cell::Transparent);
            }
            mirrored.reverse();
            mirrored
        })
        .collect();
    SpriteGrid::from_rows(width, rows)
}
