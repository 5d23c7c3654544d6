//! Colony configuration with documented constants
//!
//! Every tunable of an optimization run lives here, with the reasoning
//! behind its default and how it interacts with the others.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};

/// Which walks are allowed to reinforce the pheromone field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinforcementPolicy {
    /// Only walks that reach the end deposit pheromone
    #[default]
    SuccessfulOnly,
    /// Every walk deposits, including dead ends and exhausted walks
    ///
    /// Record-breaking successful walks still receive the second deposit.
    AllWalks,
}

/// Configuration for an optimization run
///
/// Loaded from TOML; any omitted field takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Ants dispatched per iteration
    ///
    /// More ants explore more of the maze per generation, at linear cost.
    pub num_ants: u32,

    /// Number of iterations (colony generations) to run
    pub num_iterations: u32,

    /// Pheromone deposited by one successful walk, split across its cells
    ///
    /// A walk of length L adds `deposit_amount / L` to each of its cells,
    /// so shorter paths receive a stronger per-cell reinforcement.
    pub deposit_amount: f64,

    /// Fraction of pheromone lost per iteration, in (0, 1)
    ///
    /// At 0.05 an untouched trail halves in about 14 iterations.
    pub evaporation_rate: f64,

    /// Step budget for a single walk
    ///
    /// The only guard against unbounded walks. A walk returns at most
    /// `max_steps + 1` cells.
    pub max_steps: u32,

    /// Starting pheromone level of every walkable cell
    pub initial_pheromone: f64,

    /// Exploration bias as a fraction of `deposit_amount`
    ///
    /// Added to every candidate's level before sampling, so cells with no
    /// pheromone keep a nonzero chance of being chosen. At 0.1 a cell that
    /// has absorbed one full deposit is eleven times as attractive as a
    /// fresh one.
    pub exploration_bias: f64,

    /// Which walks reinforce the field
    pub reinforcement: ReinforcementPolicy,

    /// Seed for the walk RNG; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            num_ants: 100,
            num_iterations: 100,
            deposit_amount: 1.0,
            evaporation_rate: 0.05,
            max_steps: 100,
            initial_pheromone: 0.0,
            exploration_bias: 0.1,
            reinforcement: ReinforcementPolicy::SuccessfulOnly,
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ColonyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Absolute exploration bias added to each candidate weight
    pub fn bias(&self) -> f64 {
        self.deposit_amount * self.exploration_bias
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.num_ants == 0 {
            return Err(ColonyError::InvalidArgument("num_ants must be at least 1".into()));
        }

        if self.num_iterations == 0 {
            return Err(ColonyError::InvalidArgument(
                "num_iterations must be at least 1".into(),
            ));
        }

        if self.max_steps == 0 {
            return Err(ColonyError::InvalidArgument("max_steps must be at least 1".into()));
        }

        if !(self.deposit_amount.is_finite() && self.deposit_amount > 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "deposit_amount must be positive, got {}",
                self.deposit_amount
            )));
        }

        if !(self.evaporation_rate > 0.0 && self.evaporation_rate < 1.0) {
            return Err(ColonyError::InvalidRate(self.evaporation_rate));
        }

        if !(self.initial_pheromone.is_finite() && self.initial_pheromone >= 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "initial_pheromone must be non-negative, got {}",
                self.initial_pheromone
            )));
        }

        // Bias must stay positive or an all-zero field has no distribution
        if !(self.exploration_bias.is_finite() && self.exploration_bias > 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "exploration_bias must be positive, got {}",
                self.exploration_bias
            )));
        }

        Ok(())
    }
}
