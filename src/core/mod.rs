pub mod config;
pub mod error;
pub mod types;

pub use config::{ColonyConfig, ReinforcementPolicy};
pub use error::{ColonyError, Result};
pub use types::{Coordinate, Iteration, Path};
