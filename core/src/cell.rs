use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Fixed tile palette. The first four entries are the classic puzzle colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    White,
    Magenta,
    Yellow,
    Green,
    Orange,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Self::Cyan,
        Self::White,
        Self::Magenta,
        Self::Yellow,
        Self::Green,
        Self::Orange,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Magenta => "magenta",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }

    /// CSS hex code, upper case with leading `#`.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Cyan => "#01FFDD",
            Self::White => "#FFFFFF",
            Self::Magenta => "#FF66FF",
            Self::Yellow => "#FFEE33",
            Self::Green => "#33DD55",
            Self::Orange => "#FF9933",
        }
    }

    /// Single character used by the text layout format.
    pub const fn symbol(self) -> char {
        match self {
            Self::Cyan => 'C',
            Self::White => 'W',
            Self::Magenta => 'M',
            Self::Yellow => 'Y',
            Self::Green => 'G',
            Self::Orange => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        let symbol = symbol.to_ascii_uppercase();
        Self::ALL.into_iter().find(|color| color.symbol() == symbol)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts palette names and CSS hex codes, so `"white"`, `"#FFF"` and `"#ffffff"` are the same color.
impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("#FFF") {
            return Ok(Self::White);
        }

        Self::ALL
            .into_iter()
            .find(|color| {
                s.eq_ignore_ascii_case(color.name()) || s.eq_ignore_ascii_case(color.hex())
            })
            .ok_or(GameError::UnknownColor)
    }
}

/// A single grid position, either holding a tile or empty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(Color),
}

impl Cell {
    pub const EMPTY_SYMBOL: char = '.';

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Filled(color) => Some(color),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => Self::EMPTY_SYMBOL,
            Self::Filled(color) => color.symbol(),
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        if symbol == Self::EMPTY_SYMBOL {
            return Ok(Self::Empty);
        }
        Color::from_symbol(symbol)
            .map(Self::Filled)
            .ok_or(GameError::InvalidCell(symbol))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Self::Filled(color)
    }
}
