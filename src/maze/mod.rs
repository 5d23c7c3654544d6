//! Maze topology: walkable and blocked cells
//!
//! The maze is immutable once built. How it was produced (carved, loaded
//! from text, hand-written in a test) does not matter to the colony.

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Coordinate;
use crate::spatial::Grid;

pub use loader::{LoadedMaze, MazeLoader};

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    Walkable,
    #[default]
    Blocked,
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Cell::Walkable)
    }
}

/// Rectangular walkable/blocked matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    cells: Grid<Cell>,
}

impl Maze {
    /// Build a maze from nested rows of cells
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        Ok(Self {
            cells: Grid::from_rows(rows)?,
        })
    }

    /// Maze with every cell walkable
    pub fn open(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ColonyError::InvalidArgument(format!(
                "maze dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self {
            cells: Grid::filled(rows, cols, Cell::Walkable),
        })
    }

    /// Build from an integer matrix where negative values are walls
    ///
    /// This is the `-1` wall / `0` floor layout produced by common maze
    /// generators.
    pub fn from_values(rows: &[Vec<i32>]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|&v| if v < 0 { Cell::Blocked } else { Cell::Walkable })
                        .collect()
                })
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn contains(&self, pos: Coordinate) -> bool {
        self.cells.contains(pos)
    }

    /// Cell state, `None` when out of bounds
    pub fn cell(&self, pos: Coordinate) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    pub fn is_walkable(&self, pos: Coordinate) -> bool {
        self.cell(pos).is_some_and(|cell| cell.is_walkable())
    }

    /// Mark a cell blocked or walkable while building a maze
    pub fn with_cell(mut self, pos: Coordinate, cell: Cell) -> Self {
        self.cells.set(pos, cell);
        self
    }

    pub fn cells(&self) -> &Grid<Cell> {
        &self.cells
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|(_, cell)| cell.is_walkable()).count()
    }

    /// Walkable, in-bounds, unvisited cells adjacent to `position`
    ///
    /// Order is always up, down, left, right. Excluding `visited` is what
    /// keeps a walk from backtracking.
    pub fn neighbors(&self, position: Coordinate, visited: &[Coordinate]) -> Vec<Coordinate> {
        position
            .orthogonal()
            .filter(|next| self.is_walkable(*next) && !visited.contains(next))
            .collect()
    }

    /// Ensure `pos` can be used as a start or end cell
    pub fn check_endpoint(&self, pos: Coordinate) -> Result<()> {
        match self.cell(pos) {
            None => Err(ColonyError::OutOfBounds(pos)),
            Some(Cell::Blocked) => Err(ColonyError::BlockedCell(pos)),
            Some(Cell::Walkable) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Maze {
        // . # .
        // . . .
        Maze::from_values(&[vec![0, -1, 0], vec![0, 0, 0]]).unwrap()
    }

    #[test]
    fn test_from_values_marks_walls() {
        let maze = corridor();
        assert_eq!(maze.rows(), 2);
        assert_eq!(maze.cols(), 3);
        assert_eq!(maze.cell(Coordinate::new(0, 1)), Some(Cell::Blocked));
        assert_eq!(maze.cell(Coordinate::new(1, 1)), Some(Cell::Walkable));
        assert_eq!(maze.cell(Coordinate::new(2, 0)), None);
        assert_eq!(maze.walkable_count(), 5);
    }

    #[test]
    fn test_neighbors_skip_walls_and_bounds() {
        let maze = corridor();
        let n = maze.neighbors(Coordinate::new(0, 0), &[]);
        assert_eq!(n, vec![Coordinate::new(1, 0)]);

        let n = maze.neighbors(Coordinate::new(1, 1), &[]);
        assert_eq!(n, vec![Coordinate::new(1, 0), Coordinate::new(1, 2)]);
    }

    #[test]
    fn test_neighbors_skip_visited() {
        let maze = corridor();
        let visited = [Coordinate::new(1, 0), Coordinate::new(1, 1)];
        let n = maze.neighbors(Coordinate::new(1, 1), &visited);
        assert_eq!(n, vec![Coordinate::new(1, 2)]);
    }

    #[test]
    fn test_neighbors_out_of_range_is_empty() {
        let maze = corridor();
        assert!(maze.neighbors(Coordinate::new(10, 10), &[]).is_empty());
    }

    #[test]
    fn test_check_endpoint() {
        let maze = corridor();
        assert!(maze.check_endpoint(Coordinate::new(0, 0)).is_ok());
        assert!(matches!(
            maze.check_endpoint(Coordinate::new(0, 1)),
            Err(ColonyError::BlockedCell(_))
        ));
        assert!(matches!(
            maze.check_endpoint(Coordinate::new(3, 0)),
            Err(ColonyError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_open_maze() {
        let maze = Maze::open(3, 3).unwrap();
        assert_eq!(maze.walkable_count(), 9);
        assert_eq!(maze.neighbors(Coordinate::new(1, 1), &[]).len(), 4);
        assert!(Maze::open(0, 3).is_err());
    }
}
