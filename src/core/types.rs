//! Core type definitions used throughout the codebase

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Iteration counter (one colony generation)
pub type Iteration = u32;

/// A cell position in a maze, `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Taxicab distance between two cells
    pub fn manhattan_distance(&self, other: &Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if `other` is one step up, down, left or right of `self`
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Orthogonal neighbors in fixed order: up, down, left, right.
    ///
    /// Only underflow is filtered here; callers check the upper bounds.
    pub fn orthogonal(&self) -> impl Iterator<Item = Coordinate> {
        let Coordinate { row, col } = *self;
        [
            row.checked_sub(1).map(|r| Coordinate::new(r, col)),
            row.checked_add(1).map(|r| Coordinate::new(r, col)),
            col.checked_sub(1).map(|c| Coordinate::new(row, c)),
            col.checked_add(1).map(|c| Coordinate::new(row, c)),
        ]
        .into_iter()
        .flatten()
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ordered walk through the maze, start first
pub type Path = Vec<Coordinate>;

/// Check the structural path invariants
///
/// A valid path is non-empty, never revisits a cell, and every consecutive
/// pair of cells is 4-adjacent.
pub fn is_valid_path(path: &[Coordinate]) -> bool {
    if path.is_empty() {
        return false;
    }

    let mut seen = HashSet::with_capacity(path.len());
    if !path.iter().all(|c| seen.insert(*c)) {
        return false;
    }

    path.windows(2).all(|pair| pair[0].is_adjacent(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(2, 3);
        assert_eq!(a.manhattan_distance(&b), 5);
        assert_eq!(b.manhattan_distance(&a), 5);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_adjacency_excludes_diagonals() {
        let center = Coordinate::new(1, 1);
        assert!(center.is_adjacent(&Coordinate::new(0, 1)));
        assert!(center.is_adjacent(&Coordinate::new(1, 2)));
        assert!(!center.is_adjacent(&Coordinate::new(2, 2)));
        assert!(!center.is_adjacent(&center));
    }

    #[test]
    fn test_orthogonal_order_and_underflow() {
        let corner: Vec<_> = Coordinate::new(0, 0).orthogonal().collect();
        assert_eq!(corner, vec![Coordinate::new(1, 0), Coordinate::new(0, 1)]);

        let inner: Vec<_> = Coordinate::new(1, 1).orthogonal().collect();
        assert_eq!(
            inner,
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(2, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_is_valid_path() {
        let ok = vec![(0, 0).into(), (0, 1).into(), (1, 1).into()];
        assert!(is_valid_path(&ok));

        let repeat = vec![(0, 0).into(), (0, 1).into(), (0, 0).into()];
        assert!(!is_valid_path(&repeat));

        let jump = vec![(0, 0).into(), (1, 1).into()];
        assert!(!is_valid_path(&jump));

        assert!(!is_valid_path(&[]));
        assert!(is_valid_path(&[Coordinate::new(4, 4)]));
    }
}
