//! Generic grid for per-cell data

use serde::{Deserialize, Serialize};

use crate::core::error::{ColonyError, Result};
use crate::core::types::Coordinate;

/// Generic row-major 2D grid addressed by `Coordinate`
///
/// `data.len() == rows * cols` always holds; deserialization checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr<T>")]
pub struct Grid<T: Clone + Default> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Unchecked wire form of a `Grid`
#[derive(Deserialize)]
struct GridRepr<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = ColonyError;

    fn try_from(repr: GridRepr<T>) -> Result<Self> {
        if repr.rows == 0 || repr.cols == 0 {
            return Err(ColonyError::InvalidArgument(format!(
                "grid dimensions must be non-zero, got {}x{}",
                repr.rows, repr.cols
            )));
        }
        if repr.rows.checked_mul(repr.cols) != Some(repr.data.len()) {
            return Err(ColonyError::InvalidArgument(format!(
                "grid of {}x{} cannot hold {} values",
                repr.rows,
                repr.cols,
                repr.data.len()
            )));
        }
        Ok(Self {
            rows: repr.rows,
            cols: repr.cols,
            data: repr.data,
        })
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Grid of `rows` x `cols` cells, each `T::default()`
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }

    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build from nested rows; every row must have the same non-zero length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(ColonyError::InvalidArgument("grid must have at least one cell".into()));
        }

        let height = rows.len();
        let mut data = Vec::with_capacity(height * cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(ColonyError::InvalidArgument(format!(
                    "row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }

        Ok(Self { rows: height, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn contains(&self, pos: Coordinate) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Coordinate) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    #[inline]
    pub fn get(&self, pos: Coordinate) -> Option<&T> {
        self.index(pos).map(|idx| &self.data[idx])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Coordinate) -> Option<&mut T> {
        self.index(pos).map(move |idx| &mut self.data[idx])
    }

    #[inline]
    pub fn set(&mut self, pos: Coordinate, value: T) {
        if let Some(idx) = self.index(pos) {
            self.data[idx] = value;
        }
    }

    /// Same-shaped grid with every cell transformed by `f`
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        U: Clone + Default,
        F: Fn(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// All cells in row-major order with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &T)> {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (Coordinate::new(idx / cols, idx % cols), value))
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Copy out as nested rows; empty for a zero-width grid
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.data.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}
