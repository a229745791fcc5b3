use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    /// Moves ran out before the grid was cleared.
    Exhausted,
    Cleared,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    fn for_grid(grid: &Grid, moves_remaining: u16) -> Self {
        if grid.is_cleared() {
            Self::Cleared
        } else if moves_remaining == 0 {
            Self::Exhausted
        } else {
            Self::Playing
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Why a click would not be accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    NotPlaying,
    /// No two adjacent tiles share a color and the session ends on such grids.
    Terminal,
    OutOfBounds,
    NotClickableRow,
    EmptyCell,
    NoMovesLeft,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotPlaying => "game is over",
            Self::Terminal => "no adjacent tiles share a color",
            Self::OutOfBounds => "outside the grid",
            Self::NotClickableRow => "only the bottom row can be clicked",
            Self::EmptyCell => "cell is empty",
            Self::NoMovesLeft => "no moves left",
        })
    }
}

/// A play session: the grid plus move budget, attempt counter, and optional score and level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    config: GameConfig,
    source: LayoutSource,
    initial: Grid,
    grid: Grid,
    moves_remaining: u16,
    attempt: u32,
    phase: Phase,
    stuck: bool,
    score: u32,
    level_start_score: u32,
    level: u32,
}

impl PlayEngine {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let source = config.layout.clone();
        let initial = source.generate();
        let mut engine = Self {
            grid: initial.clone(),
            initial,
            source,
            moves_remaining: config.move_budget,
            attempt: 1,
            phase: Phase::Playing,
            stuck: false,
            score: 0,
            level_start_score: 0,
            level: 1,
            config,
        };
        engine.restart();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Starting grid of the current puzzle, restored by [`Self::reset`].
    pub fn initial_grid(&self) -> &Grid {
        &self.initial
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn moves_remaining(&self) -> u16 {
        self.moves_remaining
    }

    pub fn move_budget(&self) -> u16 {
        self.config.move_budget
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether no two adjacent tiles share a color.
    ///
    /// With [`GameConfig::end_on_terminal`] every click is then rejected until a reset, otherwise
    /// each remaining move removes a single tile.
    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> Option<u64> {
        self.source.seed()
    }

    pub fn check_move(&self, coords: Coord2) -> core::result::Result<(), Rejection> {
        if !self.phase.is_playing() {
            return Err(Rejection::NotPlaying);
        }
        if self.stuck && self.config.end_on_terminal {
            return Err(Rejection::Terminal);
        }
        let Some(cell) = self.grid.get(coords) else {
            return Err(Rejection::OutOfBounds);
        };
        if !self.config.click_policy.allows(&self.grid, coords) {
            return Err(Rejection::NotClickableRow);
        }
        if cell.is_empty() {
            return Err(Rejection::EmptyCell);
        }
        if self.moves_remaining == 0 {
            return Err(Rejection::NoMovesLeft);
        }
        Ok(())
    }

    pub fn can_interact_at(&self, coords: Coord2) -> bool {
        self.check_move(coords).is_ok()
    }

    /// Region that clicking `coords` would remove, empty when the click would be rejected.
    pub fn preview(&self, coords: Coord2) -> Region {
        if self.can_interact_at(coords) {
            find_region(&self.grid, coords)
        } else {
            Region::new()
        }
    }

    pub fn attempt_move(&mut self, coords: Coord2) -> MoveOutcome {
        if let Err(reason) = self.check_move(coords) {
            log::debug!("move at {:?} rejected: {}", coords, reason);
            return MoveOutcome::NoChange;
        }

        let region = find_region(&self.grid, coords);
        let removed: CellCount = region.len().try_into().unwrap_or(CellCount::MAX);
        let next = settle(&remove_region(&self.grid, &region));
        let stuck = is_terminal(&next);

        self.grid = next;
        self.stuck = stuck;
        self.moves_remaining -= 1;
        if let Some(rules) = self.config.scoring {
            self.score = self.score.saturating_add(rules.points_for(removed));
        }
        self.phase = Phase::for_grid(&self.grid, self.moves_remaining);
        log::trace!(
            "removed {} cells at {:?}, {} moves left",
            removed,
            coords,
            self.moves_remaining
        );

        match self.phase {
            Phase::Cleared => {
                log::debug!("grid cleared on attempt {}", self.attempt);
                MoveOutcome::Cleared
            }
            Phase::Exhausted => {
                log::debug!("out of moves on attempt {}", self.attempt);
                MoveOutcome::Exhausted
            }
            Phase::Playing if stuck => MoveOutcome::Stuck,
            Phase::Playing => MoveOutcome::Removed,
        }
    }

    /// Retry the current puzzle from its starting grid.
    pub fn reset(&mut self) {
        self.attempt = self.attempt.saturating_add(1);
        self.score = self.level_start_score;
        self.restart();
        log::debug!("reset, attempt {}", self.attempt);
    }

    /// Start over on a fresh puzzle at level one.
    pub fn new_game(&mut self) {
        self.source = match (&self.config.layout, self.source.seed()) {
            (LayoutSource::Random { size, colors, .. }, Some(seed)) => LayoutSource::Random {
                size: *size,
                colors: *colors,
                seed: RandomLayoutGenerator::next_seed(seed),
            },
            (layout, _) => layout.clone(),
        };
        self.initial = self.source.generate();
        self.attempt = 1;
        self.level = 1;
        self.score = 0;
        self.level_start_score = 0;
        self.restart();
        log::debug!("new game, seed {:?}", self.source.seed());
    }

    /// Move on to the next level once the grid is cleared. Random layouts grow and reseed.
    pub fn advance_level(&mut self) -> Result<()> {
        if self.phase != Phase::Cleared {
            return Err(GameError::LevelNotCleared);
        }

        let Progression { growth, max_size } = self.config.progression;
        self.source = self.source.grown(growth, max_size);
        self.initial = self.source.generate();
        self.level = self.level.saturating_add(1);
        self.level_start_score = self.score;
        self.attempt = 1;
        self.restart();
        log::debug!("advanced to level {}, grid {:?}", self.level, self.size());
        Ok(())
    }

    fn restart(&mut self) {
        self.grid = self.initial.clone();
        self.moves_remaining = self.config.move_budget;
        self.stuck = is_terminal(&self.grid);
        self.phase = Phase::for_grid(&self.grid, self.moves_remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn fixed(rows: &[&str]) -> GameConfig {
        GameConfig::new(LayoutSource::Fixed(Grid::from_text_rows(rows).unwrap()))
    }

    fn engine(config: GameConfig) -> PlayEngine {
        PlayEngine::new(config).unwrap()
    }

    #[test]
    fn new_session_starts_playing() {
        let engine = engine(GameConfig::default());

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.moves_remaining(), 8);
        assert_eq!(engine.attempt(), 1);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.grid(), &classic_layout());
        assert!(!engine.is_stuck());
    }

    #[test]
    fn uniform_grid_clears_in_one_move() {
        let config = GameConfig::new(LayoutSource::Fixed(
            Grid::filled((5, 5), Color::Cyan).unwrap(),
        ));
        let mut engine = engine(config);

        let outcome = engine.attempt_move((4, 0));

        assert_eq!(outcome, MoveOutcome::Cleared);
        assert_eq!(engine.phase(), Phase::Cleared);
        assert!(engine.grid().is_cleared());
        assert_eq!(engine.moves_remaining(), 7);
    }

    #[test]
    fn two_by_two_move_removes_left_column() {
        let mut engine = engine(fixed(&["CW", "CW"]));

        assert_eq!(engine.preview((1, 0)), Region::from([(0, 0), (1, 0)]));
        let outcome = engine.attempt_move((1, 0));

        assert_eq!(outcome, MoveOutcome::Removed);
        assert_eq!(engine.grid(), &Grid::from_text_rows(&[".W", ".W"]).unwrap());
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.moves_remaining(), 7);
    }

    #[test]
    fn two_by_two_move_on_last_budget_exhausts() {
        let mut engine = engine(fixed(&["CW", "CW"]).with_move_budget(1));

        assert_eq!(engine.attempt_move((1, 0)), MoveOutcome::Exhausted);
        assert_eq!(engine.phase(), Phase::Exhausted);
        assert_eq!(engine.moves_remaining(), 0);
    }

    #[test]
    fn clicks_above_bottom_row_are_ignored() {
        let mut engine = engine(GameConfig::default());
        let before = engine.clone();

        assert_eq!(engine.attempt_move((3, 0)), MoveOutcome::NoChange);
        assert_eq!(engine.check_move((0, 4)), Err(Rejection::NotClickableRow));
        assert!(engine.preview((3, 0)).is_empty());
        assert_eq!(engine, before);
    }

    #[test]
    fn anywhere_policy_accepts_upper_rows() {
        let mut engine = engine(GameConfig::default().with_click_policy(ClickPolicy::Anywhere));

        // (0, 2..5) is the magenta run in the top row
        assert_eq!(engine.attempt_move((0, 2)), MoveOutcome::Removed);
        assert_eq!(engine.grid().filled_count(), 22);
        assert_eq!(engine.moves_remaining(), 7);
    }

    #[test]
    fn empty_and_out_of_bounds_clicks_are_ignored() {
        let mut engine = engine(fixed(&["C.", "C."]));
        let before = engine.clone();

        assert_eq!(engine.attempt_move((1, 1)), MoveOutcome::NoChange);
        assert_eq!(engine.attempt_move((2, 0)), MoveOutcome::NoChange);
        assert_eq!(engine.attempt_move((1, 200)), MoveOutcome::NoChange);
        assert_eq!(engine.check_move((1, 1)), Err(Rejection::EmptyCell));
        assert_eq!(engine.check_move((5, 5)), Err(Rejection::OutOfBounds));
        assert_eq!(engine, before);
    }

    #[test]
    fn single_cell_region_is_a_full_move() {
        let mut engine = engine(fixed(&["CW", "WC"]).with_end_on_terminal(false));
        assert!(engine.is_stuck());

        assert_eq!(engine.attempt_move((1, 1)), MoveOutcome::Removed);
        assert_eq!(engine.grid(), &Grid::from_text_rows(&["C.", "WW"]).unwrap());
        assert_eq!(engine.moves_remaining(), 7);
        assert!(!engine.is_stuck());
    }

    #[test]
    fn stuck_outcome_when_no_pairs_remain() {
        let mut engine = engine(fixed(&["CW", "YY"]));

        assert_eq!(engine.attempt_move((1, 0)), MoveOutcome::Stuck);
        assert_eq!(engine.grid(), &Grid::from_text_rows(&["..", "CW"]).unwrap());
        assert!(engine.is_stuck());
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.moves_remaining(), 7);
    }

    #[test]
    fn terminal_grid_rejects_every_move() {
        let mut engine = engine(fixed(&["CW", "WC"]));
        let before = engine.clone();

        assert!(engine.is_stuck());
        for col in 0..2 {
            assert_eq!(engine.check_move((1, col)), Err(Rejection::Terminal));
            assert_eq!(engine.attempt_move((1, col)), MoveOutcome::NoChange);
            assert!(engine.preview((1, col)).is_empty());
        }
        assert_eq!(engine, before);
    }

    #[test]
    fn grid_turning_terminal_stops_further_moves() {
        let mut engine = engine(fixed(&["CW", "YY"]));

        assert_eq!(engine.attempt_move((1, 0)), MoveOutcome::Stuck);
        let stuck = engine.clone();

        assert_eq!(engine.attempt_move((1, 0)), MoveOutcome::NoChange);
        assert_eq!(engine.attempt_move((1, 1)), MoveOutcome::NoChange);
        assert_eq!(engine, stuck);

        engine.reset();

        assert!(!engine.is_stuck());
        assert_eq!(engine.attempt(), 2);
        assert_eq!(engine.grid(), &Grid::from_text_rows(&["CW", "YY"]).unwrap());
    }

    #[test]
    fn exhausted_session_ignores_moves_until_reset() {
        let mut engine = engine(fixed(&["CWY", "CWM"]).with_move_budget(2));

        assert_eq!(engine.attempt_move((1, 0)), MoveOutcome::Removed);
        assert_eq!(engine.attempt_move((1, 2)), MoveOutcome::Exhausted);
        assert_eq!(engine.grid(), &Grid::from_text_rows(&[".W.", ".WY"]).unwrap());
        let exhausted = engine.clone();

        assert_eq!(engine.attempt_move((1, 1)), MoveOutcome::NoChange);
        assert_eq!(engine.check_move((1, 1)), Err(Rejection::NotPlaying));
        assert_eq!(engine, exhausted);

        engine.reset();

        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.moves_remaining(), 2);
        assert_eq!(engine.attempt(), 2);
        assert_eq!(engine.grid(), engine.initial_grid());
    }

    #[test]
    fn cleared_session_ignores_moves() {
        let mut engine = engine(fixed(&["MM"]));

        assert_eq!(engine.attempt_move((0, 0)), MoveOutcome::Cleared);
        let cleared = engine.clone();

        assert_eq!(engine.attempt_move((0, 0)), MoveOutcome::NoChange);
        assert_eq!(engine, cleared);
    }

    #[test]
    fn moves_conserve_cells_and_spend_one_budget() {
        let mut engine = engine(GameConfig::default().with_move_budget(20));

        for col in [0, 2, 4, 1, 3, 0, 2] {
            let before_cells = engine.grid().filled_count();
            let before_moves = engine.moves_remaining();
            let region_len = engine.preview((4, col)).len() as CellCount;

            let outcome = engine.attempt_move((4, col));

            if outcome.has_update() {
                assert_eq!(engine.grid().filled_count(), before_cells - region_len);
                assert_eq!(engine.moves_remaining(), before_moves - 1);
            } else {
                assert_eq!(region_len, 0);
                assert_eq!(engine.grid().filled_count(), before_cells);
                assert_eq!(engine.moves_remaining(), before_moves);
            }
        }
    }

    #[test]
    fn new_game_resets_attempts() {
        let mut engine = engine(GameConfig::default());
        engine.attempt_move((4, 0));
        engine.reset();
        engine.reset();
        assert_eq!(engine.attempt(), 3);

        engine.new_game();

        assert_eq!(engine.attempt(), 1);
        assert_eq!(engine.moves_remaining(), 8);
        assert_eq!(engine.grid(), &classic_layout());
    }

    #[test]
    fn random_new_game_draws_a_new_reproducible_layout() {
        let config = GameConfig::new(LayoutSource::Random {
            size: (6, 6),
            colors: 4,
            seed: 99,
        });
        let mut a = engine(config.clone());
        let mut b = engine(config);
        let first = a.grid().clone();

        a.reset();
        assert_eq!(a.grid(), &first);

        a.new_game();
        b.new_game();

        assert_ne!(a.seed(), Some(99));
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn scoring_counts_removed_cells() {
        let config = fixed(&["CCW", "CWW"]).with_scoring(ScoreRules::default());
        let mut engine = engine(config);

        engine.attempt_move((1, 0));
        assert_eq!(engine.score(), 30);

        engine.reset();
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn score_stays_zero_without_rules() {
        let mut engine = engine(fixed(&["CC"]));

        engine.attempt_move((0, 0));

        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn advance_level_requires_cleared_grid() {
        let mut engine = engine(GameConfig::default());

        assert_eq!(engine.advance_level(), Err(GameError::LevelNotCleared));
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn advance_level_grows_random_layout_and_keeps_score() {
        let config = GameConfig::new(LayoutSource::Random {
            size: (3, 3),
            colors: 1,
            seed: 5,
        })
        .with_scoring(ScoreRules::default())
        .with_progression(Progression {
            growth: 1,
            max_size: (4, 4),
        });
        let mut engine = engine(config);

        assert_eq!(engine.attempt_move((2, 1)), MoveOutcome::Cleared);
        assert_eq!(engine.score(), 90);
        engine.advance_level().unwrap();

        assert_eq!(engine.level(), 2);
        assert_eq!(engine.size(), (4, 4));
        assert_eq!(engine.phase(), Phase::Playing);
        assert_eq!(engine.moves_remaining(), 8);

        assert_eq!(engine.attempt_move((3, 0)), MoveOutcome::Cleared);
        engine.advance_level().unwrap();
        assert_eq!(engine.size(), (4, 4));

        engine.reset();
        assert_eq!(engine.score(), 250);

        engine.new_game();
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.size(), (3, 3));
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn empty_fixed_layout_starts_cleared() {
        let engine = engine(fixed(&["..", ".."]));

        assert_eq!(engine.phase(), Phase::Cleared);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = GameConfig::new(LayoutSource::Random {
            size: (0, 3),
            colors: 2,
            seed: 0,
        });

        assert_eq!(PlayEngine::new(config), Err(GameError::InvalidSize));
        assert_eq!(
            PlayEngine::new(GameConfig::default().with_move_budget(0)),
            Err(GameError::InvalidMoveBudget)
        );
    }

    #[test]
    fn session_survives_json_snapshot() {
        let mut engine = engine(GameConfig::default());
        engine.attempt_move((4, 2));

        let json = serde_json::to_string(&engine).unwrap();
        let restored: PlayEngine = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, engine);
        let cells: Vec<_> = restored.grid().column(2).collect();
        assert_eq!(cells.len(), 5);
    }
}
