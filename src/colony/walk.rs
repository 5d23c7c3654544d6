//! Single ant walk
//!
//! A walk starts at the start cell and repeatedly steps to a random unvisited
//! neighbor, weighted by pheromone. It stops on reaching the end, when no
//! unvisited neighbor is left, or when the step budget runs out.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::colony::pheromone::PheromoneField;
use crate::core::types::{Coordinate, Path};
use crate::maze::Maze;

/// How a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalkOutcome {
    /// Last cell is the end
    Reached,
    /// No unvisited walkable neighbor left
    DeadEnd,
    /// Stopped short of the end: step budget used up, or the field held
    /// levels too large to weigh the next step
    Exhausted,
}

/// Result of one ant's walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walk {
    pub path: Path,
    pub outcome: WalkOutcome,
}

impl Walk {
    pub fn is_successful(&self) -> bool {
        self.outcome == WalkOutcome::Reached
    }

    /// Number of cells visited, start included
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

/// Runs walks over a fixed maze between fixed endpoints
#[derive(Debug, Clone, Copy)]
pub struct WalkSimulator<'a> {
    maze: &'a Maze,
    start: Coordinate,
    end: Coordinate,
    max_steps: u32,
}

impl<'a> WalkSimulator<'a> {
    pub fn new(maze: &'a Maze, start: Coordinate, end: Coordinate, max_steps: u32) -> Self {
        Self {
            maze,
            start,
            end,
            max_steps,
        }
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Walk once, reading (never writing) the field
    ///
    /// The returned path holds at most `max_steps + 1` cells.
    pub fn simulate<R: Rng + ?Sized>(&self, field: &PheromoneField, rng: &mut R) -> Walk {
        let mut current = self.start;
        let mut path = vec![current];

        for _ in 0..self.max_steps {
            if current == self.end {
                break;
            }

            let neighbors = self.maze.neighbors(current, &path);
            if neighbors.is_empty() {
                return Walk {
                    path,
                    outcome: WalkOutcome::DeadEnd,
                };
            }

            let weights = field.probability_weights(&neighbors);
            // WeightedIndex panics on an infinite total rather than erroring
            if !weights.iter().sum::<f64>().is_finite() {
                tracing::warn!("Non-finite walk weights at {}: {:?}", current, weights);
                return Walk {
                    path,
                    outcome: WalkOutcome::Exhausted,
                };
            }
            let choice = match WeightedIndex::new(&weights) {
                Ok(dist) => dist.sample(rng),
                Err(err) => {
                    tracing::warn!("Invalid walk weights at {}: {}", current, err);
                    return Walk {
                        path,
                        outcome: WalkOutcome::Exhausted,
                    };
                }
            };

            current = neighbors[choice];
            path.push(current);
        }

        let outcome = if current == self.end {
            WalkOutcome::Reached
        } else {
            WalkOutcome::Exhausted
        };

        Walk { path, outcome }
    }
}
