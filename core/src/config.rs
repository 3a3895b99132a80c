use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Grid side used by every difficulty unless a config says otherwise.
pub const DEFAULT_GRID_SIZE: Coord = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                mine_count: 10,
                score_multiplier: 1,
                ai_survival_chance: 0.15,
            },
            Self::Medium => DifficultySettings {
                mine_count: 20,
                score_multiplier: 2,
                ai_survival_chance: 0.10,
            },
            Self::Hard => DifficultySettings {
                mine_count: 30,
                score_multiplier: 3,
                ai_survival_chance: 0.05,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::InvalidConfiguration(
                ConfigProblem::UnreadableConfig,
            ))
    }
}

/// Tunables that a difficulty maps to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultySettings {
    pub mine_count: CellCount,
    pub score_multiplier: CellCount,
    /// Probability that the AI commits to a mined cell it picked at random
    /// instead of passing on it. Committing still detonates the mine.
    pub ai_survival_chance: f64,
}

impl DifficultySettings {
    pub fn validate(&self, grid_size: Coord) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ai_survival_chance) {
            return Err(ConfigProblem::ChanceOutOfRange.into());
        }
        if self.score_multiplier == 0 {
            return Err(ConfigProblem::ZeroMultiplier.into());
        }
        if grid_size == 0 {
            return Err(ConfigProblem::EmptyGrid.into());
        }
        if self.mine_count >= area(grid_size) {
            return Err(ConfigProblem::TooManyMines.into());
        }
        Ok(())
    }
}

/// Everything needed to set up rounds for a match.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub grid_size: Coord,
    pub difficulty: Difficulty,
    /// Replaces the difficulty table entry when present.
    pub custom: Option<DifficultySettings>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl MatchConfig {
    pub const fn new(difficulty: Difficulty) -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            difficulty,
            custom: None,
        }
    }

    pub const fn with_grid_size(mut self, grid_size: Coord) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub const fn with_custom(mut self, settings: DifficultySettings) -> Self {
        self.custom = Some(settings);
        self
    }

    pub fn settings(&self) -> DifficultySettings {
        self.custom.unwrap_or(self.difficulty.settings())
    }

    pub fn validate(&self) -> Result<()> {
        self.settings().validate(self.grid_size)
    }

    /// Parses and validates a JSON document, missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|err| {
            log::warn!("Rejected match config: {}", err);
            GameError::InvalidConfiguration(ConfigProblem::UnreadableConfig)
        })?;
        config.validate().inspect_err(|err| {
            log::warn!("Rejected match config: {}", err);
        })?;
        Ok(config)
    }
}
