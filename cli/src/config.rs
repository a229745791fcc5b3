use std::path::{Path, PathBuf};

use collapse_core::{
    ClickPolicy, Coord2, GameConfig, GameError, Grid, LayoutSource, Progression, ScoreRules,
};
use serde::{Deserialize, Serialize};

/// Palette size used when a random layout is requested without one.
pub const DEFAULT_COLORS: u8 = 4;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid game config: {0}")]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyName {
    BottomRow,
    Anywhere,
}

impl From<PolicyName> for ClickPolicy {
    fn from(name: PolicyName) -> Self {
        match name {
            PolicyName::BottomRow => ClickPolicy::BottomRow,
            PolicyName::Anywhere => ClickPolicy::Anywhere,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LayoutConfig {
    Classic,
    /// One string per row, color symbols `C W M Y G O` and `.` for empty.
    Fixed { rows: Vec<String> },
    Random {
        size: Coord2,
        #[serde(default = "default_colors")]
        colors: u8,
        seed: Option<u64>,
    },
}

fn default_colors() -> u8 {
    DEFAULT_COLORS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::Classic
    }
}

/// Game settings as written in the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub move_budget: Option<u16>,
    pub click_policy: Option<PolicyName>,
    pub scoring: bool,
    pub points_per_cell: Option<u32>,
    pub layout: LayoutConfig,
    pub progression: Option<Progression>,
    pub end_on_terminal: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds the engine config. `fallback_seed` is used for random layouts without a seed.
    pub fn into_game_config(self, fallback_seed: u64) -> Result<GameConfig, ConfigError> {
        let layout = match self.layout {
            LayoutConfig::Classic => LayoutSource::Classic,
            LayoutConfig::Fixed { rows } => LayoutSource::Fixed(Grid::from_text_rows(&rows)?),
            LayoutConfig::Random { size, colors, seed } => LayoutSource::Random {
                size,
                colors,
                seed: seed.unwrap_or(fallback_seed),
            },
        };

        let mut config = GameConfig::new(layout);
        if let Some(move_budget) = self.move_budget {
            config = config.with_move_budget(move_budget);
        }
        if let Some(policy) = self.click_policy {
            config = config.with_click_policy(policy.into());
        }
        if self.scoring || self.points_per_cell.is_some() {
            let mut rules = ScoreRules::default();
            if let Some(points_per_cell) = self.points_per_cell {
                rules.points_per_cell = points_per_cell;
            }
            config = config.with_scoring(rules);
        }
        if let Some(progression) = self.progression {
            config = config.with_progression(progression);
        }
        if let Some(end_on_terminal) = self.end_on_terminal {
            config = config.with_end_on_terminal(end_on_terminal);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Command line settings that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub size: Option<Coord2>,
    pub colors: Option<u8>,
    pub move_budget: Option<u16>,
    pub anywhere: bool,
    pub scoring: bool,
    pub keep_going: bool,
}

impl Overrides {
    /// Any of seed, size or colors switches the layout to random.
    pub fn apply(
        &self,
        mut config: GameConfig,
        fallback_seed: u64,
    ) -> Result<GameConfig, ConfigError> {
        if self.seed.is_some() || self.size.is_some() || self.colors.is_some() {
            let (size, colors, seed) = match &config.layout {
                LayoutSource::Random { size, colors, seed } => (*size, *colors, *seed),
                other => (other.size(), DEFAULT_COLORS, fallback_seed),
            };
            config.layout = LayoutSource::Random {
                size: self.size.unwrap_or(size),
                colors: self.colors.unwrap_or(colors),
                seed: self.seed.unwrap_or(seed),
            };
        }
        if let Some(move_budget) = self.move_budget {
            config.move_budget = move_budget;
        }
        if self.anywhere {
            config.click_policy = ClickPolicy::Anywhere;
        }
        if self.scoring && config.scoring.is_none() {
            config.scoring = Some(ScoreRules::default());
        }
        if self.keep_going {
            config.end_on_terminal = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses `ROWSxCOLS`, e.g. `6x8`.
pub fn parse_size(s: &str) -> Result<Coord2, String> {
    let (rows, cols) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {s:?}"))?;
    let rows = rows
        .trim()
        .parse()
        .map_err(|e| format!("bad row count {rows:?}: {e}"))?;
    let cols = cols
        .trim()
        .parse()
        .map_err(|e| format!("bad column count {cols:?}: {e}"))?;
    Ok((rows, cols))
}
