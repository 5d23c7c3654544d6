use thiserror::Error;

use crate::core::types::Coordinate;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Coordinate out of bounds: {0}")]
    OutOfBounds(Coordinate),

    #[error("Coordinate is on a blocked cell: {0}")]
    BlockedCell(Coordinate),

    #[error("Evaporation rate must be in (0, 1), got {0}")]
    InvalidRate(f64),

    #[error("Cannot deposit pheromone along an empty path")]
    EmptyPath,

    #[error("Maze parse error on line {line}: {reason}")]
    MazeParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
