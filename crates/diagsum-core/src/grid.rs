//! Square digit grid and its companion marker grid.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, ScanError};

/// Largest value a grid cell may hold.
pub const MAX_DIGIT: u8 = 9;

/// A (row, column) coordinate within a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a new cell coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major offset of `cell` in an `n` x `n` buffer, if it is in bounds.
fn offset(n: usize, cell: Cell) -> Option<usize> {
    (cell.row < n && cell.col < n).then(|| cell.row * n + cell.col)
}

/// Check that a row-major buffer of `len` values fits an `n` x `n` grid.
fn check_cell_count(n: usize, len: usize) -> Result<(), GridError> {
    if n.checked_mul(n) == Some(len) {
        Ok(())
    } else {
        Err(GridError::CellCount {
            expected: n.saturating_mul(n),
            found: len,
        })
    }
}

/// Serialized form of [`Grid`], validated on the way in.
#[derive(Deserialize)]
struct RawGrid {
    n: usize,
    cells: Vec<u8>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::from_cells(raw.n, raw.cells)
    }
}

/// An immutable n x n grid of single digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    n: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Build a grid from its rows.
    ///
    /// Every row must have as many cells as there are rows, and every cell
    /// must be a digit in `0..=9`.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let n = rows.len();
        if n == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(GridError::RaggedRow {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Self::from_cells(n, cells)
    }

    /// Build a grid from a row-major cell buffer of length `n * n`.
    pub fn from_cells(n: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if n == 0 {
            return Err(GridError::Empty);
        }
        check_cell_count(n, cells.len())?;
        if let Some(index) = cells.iter().position(|&v| v > MAX_DIGIT) {
            return Err(GridError::DigitOutOfRange {
                row: index / n,
                col: index % n,
                value: cells[index],
            });
        }

        Ok(Self { n, cells })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Get the value at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        offset(self.n, Cell::new(row, col)).map(|i| self.cells[i])
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.n.max(1))
    }

    /// Check whether `markers` has the same shape as this grid.
    pub fn same_shape(&self, markers: &MarkerGrid) -> bool {
        self.n == markers.size()
    }
}

impl Index<Cell> for Grid {
    type Output = u8;

    fn index(&self, cell: Cell) -> &u8 {
        match offset(self.n, cell) {
            Some(i) => &self.cells[i],
            None => panic!(
                "cell ({}, {}) out of bounds for {n}x{n} grid",
                cell.row,
                cell.col,
                n = self.n
            ),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for value in row {
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawMarkerGrid {
    n: usize,
    marks: Vec<bool>,
}

impl TryFrom<RawMarkerGrid> for MarkerGrid {
    type Error = GridError;

    fn try_from(raw: RawMarkerGrid) -> Result<Self, Self::Error> {
        check_cell_count(raw.n, raw.marks.len())?;
        Ok(Self {
            n: raw.n,
            marks: raw.marks,
        })
    }
}

/// An n x n grid of flags recording which cells lie on a matching run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMarkerGrid")]
pub struct MarkerGrid {
    n: usize,
    marks: Vec<bool>,
}

impl MarkerGrid {
    /// Allocate an all-clear marker grid, reporting allocation failure.
    pub fn try_new(n: usize) -> Result<Self, ScanError> {
        let cells = n * n;
        let mut marks = Vec::new();
        marks
            .try_reserve_exact(cells)
            .map_err(|source| ScanError::Allocation { cells, source })?;
        marks.resize(cells, false);
        Ok(Self { n, marks })
    }

    /// Allocate an all-clear marker grid.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            marks: vec![false; n * n],
        }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Check whether `(row, col)` is marked, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        offset(self.n, Cell::new(row, col)).map(|i| self.marks[i])
    }

    /// Check whether a cell is marked. Out-of-bounds cells are never marked.
    pub fn is_marked(&self, cell: Cell) -> bool {
        offset(self.n, cell).is_some_and(|i| self.marks[i])
    }

    /// Mark a cell. Marking an already-marked cell has no further effect.
    ///
    /// # Panics
    ///
    /// Panics if `cell` lies outside the grid.
    pub fn mark(&mut self, cell: Cell) {
        match offset(self.n, cell) {
            Some(i) => self.marks[i] = true,
            None => panic!(
                "cell ({}, {}) out of bounds for {n}x{n} marker grid",
                cell.row,
                cell.col,
                n = self.n
            ),
        }
    }

    /// Fold the marks of `other` into this grid.
    ///
    /// # Panics
    ///
    /// Panics if the two grids differ in size.
    pub fn merge(&mut self, other: &MarkerGrid) {
        assert_eq!(self.n, other.n, "cannot merge marker grids of different sizes");
        for (mine, theirs) in self.marks.iter_mut().zip(&other.marks) {
            *mine |= *theirs;
        }
    }

    /// Number of marked cells.
    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }

    /// Iterate over the marked cells in row-major order.
    pub fn marked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.n;
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(move |(i, _)| Cell::new(i / n, i % n))
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.marks.chunks_exact(self.n.max(1))
    }
}

impl fmt::Display for MarkerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &marked in row {
                f.write_str(if marked { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
