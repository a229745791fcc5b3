use alloc::vec::Vec;

use crate::*;

/// Drops every tile to the bottom of its column.
///
/// Tiles keep their relative order and never change columns. Empty columns stay empty and full columns are
/// untouched.
pub fn settle(grid: &Grid) -> Grid {
    let (rows, cols) = grid.size();
    let mut settled = grid.clone();

    for col in 0..cols {
        let tiles: Vec<Cell> = grid.column(col).filter(|cell| !cell.is_empty()).collect();
        let gap = usize::from(rows) - tiles.len();

        for row in 0..rows {
            let index = usize::from(row);
            settled[(row, col)] = if index < gap {
                Cell::Empty
            } else {
                tiles[index - gap]
            };
        }
    }

    settled
}
