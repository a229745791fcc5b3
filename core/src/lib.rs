//! Engine for a single-player "collapse the grid" color puzzle.
//!
//! The player clicks a tile on the bottom row, the connected same-colored region around it disappears, the tiles
//! above fall down, and the move budget shrinks by one. [`PlayEngine`] owns a session; the grid transformations it
//! applies live in [`rules`] and are usable on their own.

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use ordinal::*;
pub use rules::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod ordinal;
pub mod rules;
mod types;

/// Move budget of the classic puzzle.
pub const DEFAULT_MOVE_BUDGET: u16 = 8;

/// Which cells accept clicks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickPolicy {
    /// Only the bottom row, the frontier the player works from.
    BottomRow,
    Anywhere,
}

impl Default for ClickPolicy {
    fn default() -> Self {
        Self::BottomRow
    }
}

impl ClickPolicy {
    pub fn allows(self, grid: &Grid, (row, _col): Coord2) -> bool {
        match self {
            Self::BottomRow => row == grid.bottom_row(),
            Self::Anywhere => true,
        }
    }
}

/// Linear scoring: every removed tile is worth the same.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub points_per_cell: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            points_per_cell: 10,
        }
    }
}

impl ScoreRules {
    pub const fn points_for(self, removed: CellCount) -> u32 {
        self.points_per_cell.saturating_mul(removed as u32)
    }
}

/// How random layouts grow when a cleared level is advanced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub growth: Coord,
    pub max_size: Coord2,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            growth: 1,
            max_size: (12, 12),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub layout: LayoutSource,
    pub move_budget: u16,
    pub click_policy: ClickPolicy,
    pub scoring: Option<ScoreRules>,
    pub progression: Progression,
    /// Reject every click once no two adjacent tiles share a color. When unset, such a grid can
    /// still be played one tile at a time until the budget runs out.
    pub end_on_terminal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(LayoutSource::Classic)
    }
}

impl GameConfig {
    pub fn new(layout: LayoutSource) -> Self {
        Self {
            layout,
            move_budget: DEFAULT_MOVE_BUDGET,
            click_policy: ClickPolicy::default(),
            scoring: None,
            progression: Progression::default(),
            end_on_terminal: true,
        }
    }

    pub fn with_move_budget(mut self, move_budget: u16) -> Self {
        self.move_budget = move_budget;
        self
    }

    pub fn with_click_policy(mut self, click_policy: ClickPolicy) -> Self {
        self.click_policy = click_policy;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoreRules) -> Self {
        self.scoring = Some(scoring);
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    pub fn with_end_on_terminal(mut self, end_on_terminal: bool) -> Self {
        self.end_on_terminal = end_on_terminal;
        self
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if self.move_budget == 0 {
            return Err(GameError::InvalidMoveBudget);
        }
        Ok(())
    }
}

/// Result of a single click.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Click was rejected, nothing changed.
    NoChange,
    Removed,
    /// Move accepted but no two adjacent tiles share a color anymore.
    Stuck,
    /// Last move spent without clearing the grid.
    Exhausted,
    Cleared,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
