use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;

/// Coordinates of a connected same-colored region.
pub type Region = BTreeSet<Coord2>;

/// Collects every cell reachable from `seed` through up/down/left/right steps that share the seed's color.
///
/// Returns an empty set when the seed is out of bounds or empty. The seed itself is always part of a non-empty
/// result.
pub fn find_region(grid: &Grid, seed: Coord2) -> Region {
    let mut region = Region::new();
    let Some(Cell::Filled(color)) = grid.get(seed) else {
        return region;
    };

    region.insert(seed);
    let mut to_visit: Vec<Coord2> = Vec::from([seed]);

    while let Some(coords) = to_visit.pop() {
        for neighbor in grid.iter_neighbors(coords) {
            if grid[neighbor] == Cell::Filled(color) && region.insert(neighbor) {
                to_visit.push(neighbor);
            }
        }
    }

    region
}

/// Copy of `grid` with every cell in `region` emptied. Coordinates outside the grid are ignored.
pub fn remove_region(grid: &Grid, region: &Region) -> Grid {
    let mut next = grid.clone();
    for &coords in region {
        if next.contains(coords) {
            next[coords] = Cell::Empty;
        }
    }
    next
}
