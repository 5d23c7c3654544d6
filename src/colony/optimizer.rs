//! Colony optimization loop
//!
//! Each iteration dispatches `num_ants` walks one after another. A successful
//! walk deposits pheromone right away, so later ants of the same iteration
//! already see it. A walk that beats the best length so far is recorded and
//! deposits a second time. The field evaporates once when the iteration ends.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::colony::output::{BestPath, ColonyOutcome, IterationStats};
use crate::colony::pheromone::PheromoneField;
use crate::colony::walk::{Walk, WalkOutcome, WalkSimulator};
use crate::core::config::{ColonyConfig, ReinforcementPolicy};
use crate::core::error::Result;
use crate::core::types::{is_valid_path, Coordinate, Iteration};
use crate::maze::Maze;

/// Lifecycle of an optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    /// Built, no iteration run yet
    Initializing,
    /// At least one iteration done, more to go
    Iterating { completed: Iteration },
    /// All configured iterations done
    Terminated,
}

/// Owns the pheromone field and drives iterations over a borrowed maze
pub struct ColonyOptimizer<'a, R: Rng = ChaCha8Rng> {
    simulator: WalkSimulator<'a>,
    config: ColonyConfig,
    field: PheromoneField,
    best: Option<BestPath>,
    history: Vec<IterationStats>,
    state: OptimizerState,
    rng: R,
}

impl<'a> ColonyOptimizer<'a, ChaCha8Rng> {
    /// Optimizer seeded from `config.seed`, or from OS entropy if unset
    pub fn new(
        maze: &'a Maze,
        start: Coordinate,
        end: Coordinate,
        config: ColonyConfig,
    ) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(maze, start, end, config, rng)
    }
}

impl<'a, R: Rng> ColonyOptimizer<'a, R> {
    /// Optimizer drawing every walk decision from `rng`
    pub fn with_rng(
        maze: &'a Maze,
        start: Coordinate,
        end: Coordinate,
        config: ColonyConfig,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        maze.check_endpoint(start)?;
        maze.check_endpoint(end)?;

        let field = PheromoneField::with_params(maze, config.initial_pheromone, config.bias())?;
        let simulator = WalkSimulator::new(maze, start, end, config.max_steps);

        Ok(Self {
            simulator,
            history: Vec::with_capacity(config.num_iterations as usize),
            config,
            field,
            best: None,
            state: OptimizerState::Initializing,
            rng,
        })
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn field(&self) -> &PheromoneField {
        &self.field
    }

    pub fn best(&self) -> Option<&BestPath> {
        self.best.as_ref()
    }

    pub fn history(&self) -> &[IterationStats] {
        &self.history
    }

    /// Run one iteration; `None` once the optimizer has terminated
    pub fn step(&mut self) -> Result<Option<IterationStats>> {
        let iteration = match self.state {
            OptimizerState::Initializing => 1,
            OptimizerState::Iterating { completed } => completed + 1,
            OptimizerState::Terminated => return Ok(None),
        };

        let mut stats = IterationStats {
            iteration,
            ..Default::default()
        };

        for _ in 0..self.config.num_ants {
            let walk = self.simulator.simulate(&self.field, &mut self.rng);
            debug_assert!(is_valid_path(&walk.path));
            tracing::trace!(
                "Iteration {}: walk of {} cells, {:?}",
                iteration,
                walk.len(),
                walk.outcome
            );

            match walk.outcome {
                WalkOutcome::Reached => stats.successful_walks += 1,
                WalkOutcome::DeadEnd => stats.dead_ends += 1,
                WalkOutcome::Exhausted => stats.exhausted_walks += 1,
            }

            if walk.is_successful() {
                let len = walk.len();
                stats.shortest_length = Some(stats.shortest_length.map_or(len, |s| s.min(len)));
                if self.reinforce_success(walk, iteration)? {
                    stats.improved = true;
                }
            } else if self.config.reinforcement == ReinforcementPolicy::AllWalks {
                self.field.deposit(&walk.path, self.config.deposit_amount)?;
            }
        }

        self.field.evaporate(self.config.evaporation_rate)?;

        stats.best_length = self.best.as_ref().map(BestPath::len);
        stats.total_pheromone = self.field.total();

        tracing::debug!(
            "Iteration {}: {} reached, {} dead ends, {} exhausted, best {:?}",
            iteration,
            stats.successful_walks,
            stats.dead_ends,
            stats.exhausted_walks,
            stats.best_length
        );

        self.history.push(stats.clone());
        self.state = if iteration >= self.config.num_iterations {
            OptimizerState::Terminated
        } else {
            OptimizerState::Iterating { completed: iteration }
        };

        Ok(Some(stats))
    }

    /// Deposit for a successful walk; returns true if it set a new record
    fn reinforce_success(&mut self, walk: Walk, iteration: Iteration) -> Result<bool> {
        let amount = self.config.deposit_amount;
        self.field.deposit(&walk.path, amount)?;

        // Strictly shorter only: an equal-length path never displaces the first
        let is_record = self.best.as_ref().map_or(true, |best| walk.len() < best.len());
        if !is_record {
            return Ok(false);
        }

        // Record-breaking trails are reinforced twice
        self.field.deposit(&walk.path, amount)?;
        tracing::info!(
            "New best path: {} cells in iteration {}",
            walk.len(),
            iteration
        );
        self.best = Some(BestPath {
            path: walk.into_path(),
            iteration,
        });
        Ok(true)
    }

    /// Run every remaining iteration and hand back the result
    pub fn run(mut self) -> Result<ColonyOutcome> {
        let start = Instant::now();

        while self.step()?.is_some() {}

        let elapsed = start.elapsed();
        match &self.best {
            Some(best) => tracing::info!(
                "Colony finished after {} iterations: best path {} cells (iteration {})",
                self.history.len(),
                best.len(),
                best.iteration
            ),
            None => tracing::info!(
                "Colony finished after {} iterations: no ant reached {}",
                self.history.len(),
                self.simulator.end()
            ),
        }

        Ok(ColonyOutcome::new(self.best, self.field, self.history, elapsed))
    }
}

/// Run a full optimization with a config-seeded RNG
pub fn run(
    maze: &Maze,
    start: Coordinate,
    end: Coordinate,
    config: ColonyConfig,
) -> Result<ColonyOutcome> {
    ColonyOptimizer::new(maze, start, end, config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ColonyError;
    use rand::rngs::StdRng;
    use rand::RngCore;

    const EPS: f64 = 1e-12;

    /// Replays a fixed cycle of 64-bit draws
    ///
    /// `1 << 62` samples a float of 0.25 and `3 << 62` one of 0.75.
    struct ScriptedRng {
        draws: Vec<u64>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(draws: &[u64]) -> Self {
            Self {
                draws: draws.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let value = self.draws[self.next % self.draws.len()];
            self.next += 1;
            value
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn seeded(num_ants: u32, num_iterations: u32) -> ColonyConfig {
        ColonyConfig {
            num_ants,
            num_iterations,
            seed: Some(11),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_three_by_three() {
        let maze = Maze::open(3, 3).unwrap();
        let config = ColonyConfig {
            num_ants: 50,
            num_iterations: 20,
            evaporation_rate: 0.1,
            deposit_amount: 1.0,
            max_steps: 50,
            seed: Some(5),
            ..Default::default()
        };
        let end = Coordinate::new(2, 2);

        let outcome = run(&maze, Coordinate::new(0, 0), end, config).unwrap();
        let path = outcome.best_path.expect("an ant should reach the corner");
        assert!(path.len() >= 5);
        assert_eq!(*path.last().unwrap(), end);
        assert!(is_valid_path(&path));
        assert!(outcome.best_iteration.is_some());
    }

    #[test]
    fn test_enclosed_start_never_succeeds() {
        let maze = Maze::from_values(&[vec![0, -1, 0], vec![-1, -1, 0], vec![0, 0, 0]]).unwrap();
        let outcome = run(&maze, Coordinate::new(0, 0), Coordinate::new(2, 2), seeded(5, 4)).unwrap();

        assert!(outcome.best_path.is_none());
        assert!(outcome.best_iteration.is_none());
        assert_eq!(outcome.history.len(), 4);
        assert!(outcome.history.iter().all(|s| s.dead_ends == 5));
    }

    #[test]
    fn test_double_reinforcement_for_record() {
        // Corridor: every walk succeeds with the same two-cell path
        let maze = Maze::open(1, 2).unwrap();
        let config = ColonyConfig {
            num_ants: 1,
            num_iterations: 2,
            evaporation_rate: 0.5,
            ..seeded(1, 2)
        };
        let mut optimizer =
            ColonyOptimizer::new(&maze, Coordinate::new(0, 0), Coordinate::new(0, 1), config).unwrap();

        // Iteration 1: 0.5 + 0.5 (record) then halved
        let stats = optimizer.step().unwrap().unwrap();
        assert!(stats.improved);
        let level = optimizer.field().level(Coordinate::new(0, 0)).unwrap();
        assert!((level - 0.5).abs() < EPS);

        // Iteration 2: equal length, single deposit then halved
        let stats = optimizer.step().unwrap().unwrap();
        assert!(!stats.improved);
        let level = optimizer.field().level(Coordinate::new(0, 1)).unwrap();
        assert!((level - 0.5).abs() < EPS);
    }

    #[test]
    fn test_equal_length_keeps_first_iteration() {
        let maze = Maze::open(1, 6).unwrap();
        let outcome = run(&maze, Coordinate::new(0, 0), Coordinate::new(0, 5), seeded(3, 10)).unwrap();
        assert_eq!(outcome.best_iteration, Some(1));
        assert_eq!(outcome.best_path.map(|p| p.len()), Some(6));
    }

    #[test]
    fn test_best_is_shortest_seen() {
        let maze = Maze::open(4, 4).unwrap();
        let mut optimizer =
            ColonyOptimizer::new(&maze, Coordinate::new(0, 0), Coordinate::new(3, 3), seeded(20, 15))
                .unwrap();

        let mut shortest: Option<usize> = None;
        while let Some(stats) = optimizer.step().unwrap() {
            if let Some(len) = stats.shortest_length {
                shortest = Some(shortest.map_or(len, |s| s.min(len)));
            }
            assert_eq!(stats.best_length, shortest);
        }
        assert_eq!(optimizer.best().map(BestPath::len), shortest);
    }

    #[test]
    fn test_state_machine() {
        let maze = Maze::open(2, 2).unwrap();
        let mut optimizer =
            ColonyOptimizer::new(&maze, Coordinate::new(0, 0), Coordinate::new(1, 1), seeded(2, 2))
                .unwrap();
        assert_eq!(optimizer.state(), OptimizerState::Initializing);

        optimizer.step().unwrap();
        assert_eq!(optimizer.state(), OptimizerState::Iterating { completed: 1 });

        optimizer.step().unwrap();
        assert_eq!(optimizer.state(), OptimizerState::Terminated);

        assert!(optimizer.step().unwrap().is_none());
        assert_eq!(optimizer.history().len(), 2);
    }

    #[test]
    fn test_successful_only_leaves_unreached_field_empty() {
        // End is cut off from start by a wall column
        let maze = Maze::from_values(&[vec![0, -1, 0], vec![0, -1, 0]]).unwrap();
        let outcome = run(&maze, Coordinate::new(0, 0), Coordinate::new(0, 2), seeded(4, 3)).unwrap();
        assert!(outcome.best_path.is_none());
        assert_eq!(outcome.field.total(), 0.0);
    }

    #[test]
    fn test_all_walks_policy_reinforces_failures() {
        let maze = Maze::from_values(&[vec![0, -1, 0], vec![0, -1, 0]]).unwrap();
        let config = ColonyConfig {
            reinforcement: ReinforcementPolicy::AllWalks,
            ..seeded(4, 3)
        };
        let outcome = run(&maze, Coordinate::new(0, 0), Coordinate::new(0, 2), config).unwrap();
        assert!(outcome.best_path.is_none());
        assert!(outcome.field.total() > 0.0);
        assert_eq!(outcome.field.level(Coordinate::new(0, 2)), Some(0.0));
    }

    #[test]
    fn test_injected_rng_is_reproducible() {
        let maze = Maze::open(4, 4).unwrap();
        let start = Coordinate::new(0, 0);
        let end = Coordinate::new(3, 3);
        let config = ColonyConfig {
            seed: None,
            ..seeded(10, 5)
        };

        let a = ColonyOptimizer::with_rng(&maze, start, end, config.clone(), StdRng::seed_from_u64(8))
            .unwrap()
            .run()
            .unwrap();
        let b = ColonyOptimizer::with_rng(&maze, start, end, config, StdRng::seed_from_u64(8))
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(a.best_path, b.best_path);
        assert_eq!(a.best_iteration, b.best_iteration);
        assert_eq!(a.field, b.field);
    }

    #[test]
    fn test_rejects_invalid_endpoints_and_config() {
        let maze = Maze::from_values(&[vec![0, -1], vec![0, 0]]).unwrap();
        let ok = Coordinate::new(0, 0);

        let blocked = run(&maze, ok, Coordinate::new(0, 1), seeded(1, 1));
        assert!(matches!(blocked, Err(ColonyError::BlockedCell(_))));

        let outside = run(&maze, Coordinate::new(5, 0), ok, seeded(1, 1));
        assert!(matches!(outside, Err(ColonyError::OutOfBounds(_))));

        let bad_rate = ColonyConfig {
            evaporation_rate: 1.0,
            ..seeded(1, 1)
        };
        assert!(matches!(
            run(&maze, ok, Coordinate::new(1, 1), bad_rate),
            Err(ColonyError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_later_ants_see_earlier_deposits() {
        // . S .   end on the left, dead end on the right
        let maze = Maze::open(1, 3).unwrap();
        let start = Coordinate::new(0, 1);
        let end = Coordinate::new(0, 0);
        let draws = [1u64 << 62, 3u64 << 62];

        // Against a fresh field the second draw picks the dead end
        let fresh = PheromoneField::initialize(&maze);
        let sim = WalkSimulator::new(&maze, start, end, 10);
        let mut rng = ScriptedRng::new(&draws[1..]);
        assert_eq!(sim.simulate(&fresh, &mut rng).outcome, WalkOutcome::DeadEnd);

        // In the optimizer the first ant's record deposit makes the same
        // draw land on the end for the second ant
        let config = ColonyConfig {
            seed: None,
            ..seeded(2, 1)
        };
        let mut optimizer =
            ColonyOptimizer::with_rng(&maze, start, end, config, ScriptedRng::new(&draws)).unwrap();
        let stats = optimizer.step().unwrap().unwrap();

        assert_eq!(stats.successful_walks, 2);
        assert_eq!(stats.dead_ends, 0);
        assert_eq!(stats.shortest_length, Some(2));
        assert_eq!(optimizer.field().level(Coordinate::new(0, 2)), Some(0.0));
    }
}
