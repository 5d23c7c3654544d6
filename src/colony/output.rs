//! Run output and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::colony::pheromone::PheromoneField;
use crate::core::types::{Iteration, Path};

/// Shortest successful path seen so far
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestPath {
    pub path: Path,
    /// 1-based iteration in which this path was first found
    pub iteration: Iteration,
}

impl BestPath {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Per-iteration counters
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    pub iteration: Iteration,
    pub successful_walks: u32,
    pub dead_ends: u32,
    pub exhausted_walks: u32,
    /// Shortest successful walk in this iteration
    pub shortest_length: Option<usize>,
    /// Best length known at the end of this iteration
    pub best_length: Option<usize>,
    /// True if this iteration set a new best path
    pub improved: bool,
    /// Total walkable pheromone after evaporation
    pub total_pheromone: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub iterations: Iteration,
    pub total_walks: u64,
    pub successful_walks: u64,
    pub run_time_ms: u64,
}

/// Complete result of an optimization run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColonyOutcome {
    pub best_path: Option<Path>,
    /// Iteration of the best path, `None` when no ant succeeded
    pub best_iteration: Option<Iteration>,
    pub field: PheromoneField,
    pub history: Vec<IterationStats>,
    pub statistics: RunStats,
}

impl ColonyOutcome {
    pub fn new(
        best: Option<BestPath>,
        field: PheromoneField,
        history: Vec<IterationStats>,
        elapsed: Duration,
    ) -> Self {
        let successful_walks = history.iter().map(|s| s.successful_walks as u64).sum();
        let total_walks = history
            .iter()
            .map(|s| (s.successful_walks + s.dead_ends + s.exhausted_walks) as u64)
            .sum();

        let statistics = RunStats {
            iterations: history.len() as Iteration,
            total_walks,
            successful_walks,
            run_time_ms: elapsed.as_millis() as u64,
        };

        let (best_path, best_iteration) = match best {
            Some(best) => (Some(best.path), Some(best.iteration)),
            None => (None, None),
        };

        Self {
            best_path,
            best_iteration,
            field,
            history,
            statistics,
        }
    }

    pub fn found_path(&self) -> bool {
        self.best_path.is_some()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let best = match (&self.best_path, self.best_iteration) {
            (Some(path), Some(iteration)) => {
                format!("best path of {} cells found in iteration {}", path.len(), iteration)
            }
            _ => "no ant reached the end".to_string(),
        };

        format!(
            "Ran {} iterations in {}ms\n{} of {} walks succeeded, {}",
            self.statistics.iterations,
            self.statistics.run_time_ms,
            self.statistics.successful_walks,
            self.statistics.total_walks,
            best,
        )
    }
}
