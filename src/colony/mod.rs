//! Ant colony optimization over a maze
//!
//! - `pheromone`: the shared field walks read and successful walks reinforce
//! - `walk`: one stochastic, non-backtracking ant
//! - `optimizer`: the iteration loop, best-path record and evaporation
//! - `output`: serializable run results

pub mod optimizer;
pub mod output;
pub mod pheromone;
pub mod walk;

pub use optimizer::{run, ColonyOptimizer, OptimizerState};
pub use output::{BestPath, ColonyOutcome, IterationStats, RunStats};
pub use pheromone::{PheromoneField, WALL_SENTINEL};
pub use walk::{Walk, WalkOutcome, WalkSimulator};
