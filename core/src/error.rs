use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigProblem),
    #[error("Invalid move: {0}")]
    InvalidMove(MoveProblem),
    #[error("Round already over, no new moves are accepted")]
    RoundAlreadyOver,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("mine count must be smaller than the number of cells")]
    TooManyMines,
    #[error("grid must have at least one cell")]
    EmptyGrid,
    #[error("AI chance must be within 0 and 1")]
    ChanceOutOfRange,
    #[error("score multiplier must be positive")]
    ZeroMultiplier,
    #[error("configuration could not be parsed")]
    UnreadableConfig,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveProblem {
    #[error("coordinates are outside the grid")]
    OutOfBounds,
    #[error("cell is not hidden")]
    NotHidden,
}

impl From<ConfigProblem> for GameError {
    fn from(problem: ConfigProblem) -> Self {
        Self::InvalidConfiguration(problem)
    }
}

impl From<MoveProblem> for GameError {
    fn from(problem: MoveProblem) -> Self {
        Self::InvalidMove(problem)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
