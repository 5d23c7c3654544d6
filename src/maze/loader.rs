//! Load mazes from plain-text layouts
//!
//! One line per row. `#` is a wall, `.` or a space is floor, `S` marks the
//! start and `E` the end (both floor). Trailing blank lines are ignored and
//! every row must have the same width.

use std::path::Path;

use crate::core::error::{ColonyError, Result};
use crate::core::types::Coordinate;
use crate::maze::{Cell, Maze};

/// A parsed maze with its optional start and end markers
#[derive(Debug, Clone)]
pub struct LoadedMaze {
    pub maze: Maze,
    pub start: Option<Coordinate>,
    pub end: Option<Coordinate>,
}

/// Text maze parser
pub struct MazeLoader;

impl MazeLoader {
    /// Parse a maze from a string
    pub fn from_str(text: &str) -> Result<LoadedMaze> {
        let lines: Vec<&str> = text.trim_end_matches(['\n', '\r']).lines().collect();
        if lines.is_empty() {
            return Err(ColonyError::MazeParse {
                line: 1,
                reason: "maze text is empty".into(),
            });
        }

        let width = lines[0].chars().count();
        let mut rows = Vec::with_capacity(lines.len());
        let mut start = None;
        let mut end = None;

        for (row, line) in lines.iter().enumerate() {
            let line_no = row + 1;
            let line = line.trim_end_matches('\r');

            if line.chars().count() != width {
                return Err(ColonyError::MazeParse {
                    line: line_no,
                    reason: format!("expected {} cells, found {}", width, line.chars().count()),
                });
            }

            let mut cells = Vec::with_capacity(width);
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Blocked,
                    '.' | ' ' => Cell::Walkable,
                    'S' => {
                        Self::place_marker(&mut start, Coordinate::new(row, col), 'S', line_no)?;
                        Cell::Walkable
                    }
                    'E' => {
                        Self::place_marker(&mut end, Coordinate::new(row, col), 'E', line_no)?;
                        Cell::Walkable
                    }
                    other => {
                        return Err(ColonyError::MazeParse {
                            line: line_no,
                            reason: format!("unexpected character {:?} at column {}", other, col + 1),
                        })
                    }
                };
                cells.push(cell);
            }
            rows.push(cells);
        }

        let maze = Maze::new(rows).map_err(|e| ColonyError::MazeParse {
            line: 1,
            reason: e.to_string(),
        })?;

        Ok(LoadedMaze { maze, start, end })
    }

    /// Parse a maze from a text file on disk
    pub fn from_file(path: &Path) -> Result<LoadedMaze> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    fn place_marker(
        slot: &mut Option<Coordinate>,
        pos: Coordinate,
        marker: char,
        line: usize,
    ) -> Result<()> {
        if let Some(existing) = slot {
            return Err(ColonyError::MazeParse {
                line,
                reason: format!("duplicate '{}' marker, first seen at {}", marker, existing),
            });
        }
        *slot = Some(pos);
        Ok(())
    }
}
