use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid must have at least one row and one column")]
    InvalidSize,
    #[error("Grid rows do not all have the same length")]
    InvalidBoardShape,
    #[error("Unknown cell symbol {0:?}")]
    InvalidCell(char),
    #[error("Unknown color")]
    UnknownColor,
    #[error("Palette size must be between 1 and {max}", max = crate::Color::ALL.len())]
    InvalidPalette,
    #[error("Move budget must be at least 1")]
    InvalidMoveBudget,
    #[error("Level can only advance once the grid is cleared")]
    LevelNotCleared,
}

pub type Result<T> = core::result::Result<T, GameError>;
