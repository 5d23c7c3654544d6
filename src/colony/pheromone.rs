//! Pheromone field aligned with the maze
//!
//! Walls carry `WALL_SENTINEL` for the life of the field; they are never
//! read as a level and never updated. Walkable cells start at a baseline,
//! grow under `deposit` and decay geometrically under `evaporate`.

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Coordinate;
use crate::maze::Maze;
use crate::spatial::Grid;

/// Value stored in blocked cells
pub const WALL_SENTINEL: f64 = -1.0;

/// Default exploration bias when the field is built without parameters
pub const DEFAULT_BIAS: f64 = 0.1;

/// Per-cell pheromone levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PheromoneField {
    levels: Grid<f64>,
    bias: f64,
}

impl PheromoneField {
    /// Field with a zero baseline and the default exploration bias
    pub fn initialize(maze: &Maze) -> Self {
        Self::build(maze, 0.0, DEFAULT_BIAS)
    }

    /// Field with an explicit baseline level and exploration bias
    ///
    /// The baseline must be finite and non-negative so it can never be
    /// confused with the wall sentinel; the bias must be finite and positive.
    pub fn with_params(maze: &Maze, baseline: f64, bias: f64) -> Result<Self> {
        if !(baseline.is_finite() && baseline >= 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "baseline pheromone must be non-negative, got {}",
                baseline
            )));
        }
        if !(bias.is_finite() && bias > 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "exploration bias must be positive, got {}",
                bias
            )));
        }
        Ok(Self::build(maze, baseline, bias))
    }

    fn build(maze: &Maze, baseline: f64, bias: f64) -> Self {
        let levels = maze
            .cells()
            .map(|cell| if cell.is_walkable() { baseline } else { WALL_SENTINEL });

        Self { levels, bias }
    }

    pub fn rows(&self) -> usize {
        self.levels.rows()
    }

    pub fn cols(&self) -> usize {
        self.levels.cols()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// True if `pos` holds the wall sentinel (or is out of bounds)
    #[inline]
    pub fn is_wall(&self, pos: Coordinate) -> bool {
        self.levels.get(pos).map_or(true, |v| *v < 0.0)
    }

    /// Pheromone level of a walkable cell, `None` for walls and out of bounds
    pub fn level(&self, pos: Coordinate) -> Option<f64> {
        self.levels.get(pos).copied().filter(|v| *v >= 0.0)
    }

    /// Raw stored value, sentinel included
    pub fn raw(&self, pos: Coordinate) -> Option<f64> {
        self.levels.get(pos).copied()
    }

    /// Add `amount / path.len()` to every walkable cell on `path`
    ///
    /// Shorter paths get the larger per-cell share. Wall or out-of-bounds
    /// coordinates are skipped.
    pub fn deposit(&mut self, path: &[Coordinate], amount: f64) -> Result<()> {
        if path.is_empty() {
            return Err(ColonyError::EmptyPath);
        }
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(ColonyError::InvalidArgument(format!(
                "deposit amount must be non-negative, got {}",
                amount
            )));
        }

        let share = amount / path.len() as f64;
        for pos in path {
            if let Some(level) = self.levels.get_mut(*pos) {
                if *level >= 0.0 {
                    *level += share;
                }
            }
        }
        Ok(())
    }

    /// Multiply every walkable cell by `1 - rate`
    ///
    /// Run once per iteration, after every ant of that iteration.
    pub fn evaporate(&mut self, rate: f64) -> Result<()> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(ColonyError::InvalidRate(rate));
        }

        let keep = 1.0 - rate;
        self.levels
            .values_mut()
            .filter(|level| **level >= 0.0)
            .for_each(|level| *level *= keep);
        Ok(())
    }

    /// Unnormalized selection weights for `candidates`, in the same order
    ///
    /// Each weight is the candidate's level plus the exploration bias, so
    /// the total is strictly positive for any non-empty input even on a
    /// fresh all-zero field.
    pub fn probability_weights(&self, candidates: &[Coordinate]) -> Vec<f64> {
        candidates
            .iter()
            .map(|pos| self.level(*pos).unwrap_or(0.0) + self.bias)
            .collect()
    }

    /// Sum of all walkable levels
    pub fn total(&self) -> f64 {
        self.levels.iter().map(|(_, v)| *v).filter(|v| *v >= 0.0).sum()
    }

    /// Nested rows of raw values, walls as `WALL_SENTINEL`
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.levels.to_rows()
    }
}
