use std::fmt;

/// Construction-time failures. Nothing inside a tick produces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    UnknownMap { index: usize, available: usize },
    UnknownDifficulty { name: String },
    InvalidDifficulty { reason: String },
    InvalidLevel { reason: String },
    UnknownTileCode { row: usize, col: usize, code: i8 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMap { index, available } => {
                write!(f, "unknown map {index}: only {available} maps are available")
            }
            Self::UnknownDifficulty { name } => write!(
                f,
                "unknown difficulty {name:?}: expected easy, normal, hard or impossible"
            ),
            Self::InvalidDifficulty { reason } => write!(f, "invalid difficulty: {reason}"),
            Self::InvalidLevel { reason } => write!(f, "invalid level: {reason}"),
            Self::UnknownTileCode { row, col, code } => {
                write!(f, "unknown tile code {code} at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for GameError {}

pub type GameResult<T> = Result<T, GameError>;
