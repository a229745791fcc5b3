use crate::*;

/// Whether no move can remove more than a single tile: no two orthogonally adjacent tiles share a color.
///
/// An all-empty grid is terminal.
pub fn is_terminal(grid: &Grid) -> bool {
    let (rows, cols) = grid.size();

    for row in 0..rows {
        for col in 0..cols {
            let Cell::Filled(color) = grid[(row, col)] else {
                continue;
            };
            if grid
                .iter_neighbors((row, col))
                .any(|neighbor| grid[neighbor] == Cell::Filled(color))
            {
                return false;
            }
        }
    }

    true
}
