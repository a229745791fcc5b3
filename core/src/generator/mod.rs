use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, size: Coord2) -> Grid;
}

/// Color symbols of the classic 5×5 puzzle, top row first.
pub const CLASSIC_ROWS: [&str; 5] = ["CWMMM", "CMWWY", "YCWYM", "YWCCY", "YCWYW"];

const CLASSIC_COLORS: [[Color; 5]; 5] = {
    use Color::*;
    [
        [Cyan, White, Magenta, Magenta, Magenta],
        [Cyan, Magenta, White, White, Yellow],
        [Yellow, Cyan, White, Yellow, Magenta],
        [Yellow, White, Cyan, Cyan, Yellow],
        [Yellow, Cyan, White, Yellow, White],
    ]
};

/// The hand-made puzzle the game ships with.
pub fn classic_layout() -> Grid {
    Grid::from_array_unchecked(Array2::from_shape_fn((5, 5), |(row, col)| {
        Cell::Filled(CLASSIC_COLORS[row][col])
    }))
}

/// Where a session takes its starting grid from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutSource {
    Classic,
    Fixed(Grid),
    Random { size: Coord2, colors: u8, seed: u64 },
}

impl Default for LayoutSource {
    fn default() -> Self {
        Self::Classic
    }
}

impl LayoutSource {
    pub fn size(&self) -> Coord2 {
        match self {
            Self::Classic => (5, 5),
            Self::Fixed(grid) => grid.size(),
            Self::Random { size, .. } => *size,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Random { seed, .. } => Some(*seed),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Classic => Ok(()),
            Self::Fixed(grid) => grid.validate(),
            Self::Random { size, colors, .. } => {
                if size.0 == 0 || size.1 == 0 {
                    return Err(GameError::InvalidSize);
                }
                if *colors == 0 || usize::from(*colors) > Color::ALL.len() {
                    return Err(GameError::InvalidPalette);
                }
                Ok(())
            }
        }
    }

    pub fn generate(&self) -> Grid {
        match self {
            Self::Classic => classic_layout(),
            Self::Fixed(grid) => grid.clone(),
            Self::Random { size, colors, seed } => {
                RandomLayoutGenerator::new(*seed, *colors).generate(*size)
            }
        }
    }

    /// Same source with the seed advanced, so the next random puzzle differs but stays reproducible.
    pub fn reseeded(&self) -> Self {
        match self {
            Self::Random { size, colors, seed } => Self::Random {
                size: *size,
                colors: *colors,
                seed: RandomLayoutGenerator::next_seed(*seed),
            },
            other => other.clone(),
        }
    }

    /// Random sources grow by `growth` in both dimensions, capped at `max_size`. Fixed layouts cannot resize.
    pub fn grown(&self, growth: Coord, max_size: Coord2) -> Self {
        match self.reseeded() {
            Self::Random { size, colors, seed } => Self::Random {
                size: (
                    size.0.saturating_add(growth).min(max_size.0.max(size.0)),
                    size.1.saturating_add(growth).min(max_size.1.max(size.1)),
                ),
                colors,
                seed,
            },
            other => other,
        }
    }
}
