//! Maze Colony - Ant colony optimization for grid mazes

pub mod colony;
pub mod core;
pub mod maze;
pub mod spatial;
