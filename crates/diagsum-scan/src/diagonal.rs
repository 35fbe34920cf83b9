//! Diagonal families and the per-diagonal run check.
//!
//! Every diagonal of length two or more is reached from exactly one edge
//! start cell:
//!
//! - forward (down-right) diagonals start on the left edge, or on the top
//!   edge at column 1 or later;
//! - backward (down-left) diagonals start on the right edge, or on the top
//!   edge at column `n - 2` or earlier.
//!
//! The top-edge ranges skip the corner that the side-edge family already
//! starts from, so no diagonal is visited twice.

use std::ops::Range;

use diagsum_core::{Cell, Grid, MarkerGrid, WorkerStats};

/// Direction and starting edge of a diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Down-right from `(offset, 0)`.
    ForwardFromLeft,
    /// Down-left from `(offset, n - 1)`.
    BackwardFromRight,
    /// Down-right from `(0, offset)`.
    ForwardFromTop,
    /// Down-left from `(0, offset)`.
    BackwardFromTop,
}

impl Family {
    /// All four families.
    pub const ALL: [Family; 4] = [
        Family::ForwardFromLeft,
        Family::BackwardFromRight,
        Family::ForwardFromTop,
        Family::BackwardFromTop,
    ];

    /// Families started from each row of a worker's range.
    pub const ROW_EDGE: [Family; 2] = [Family::ForwardFromLeft, Family::BackwardFromRight];

    /// Families started from the top row, owned by a single worker.
    pub const TOP_EDGE: [Family; 2] = [Family::ForwardFromTop, Family::BackwardFromTop];

    /// Check if this family starts on the top edge.
    pub fn is_top_edge(self) -> bool {
        matches!(self, Family::ForwardFromTop | Family::BackwardFromTop)
    }

    /// Start offsets (rows or columns) this family owns in an `n` x `n` grid.
    pub fn offsets(self, n: usize) -> Range<usize> {
        match self {
            Family::ForwardFromLeft | Family::BackwardFromRight => 0..n,
            Family::ForwardFromTop => 1.min(n)..n,
            Family::BackwardFromTop => 0..n.saturating_sub(1),
        }
    }
}

/// One diagonal, identified by its family and start offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagonal {
    family: Family,
    offset: usize,
    n: usize,
}

impl Diagonal {
    /// Create the diagonal of `family` starting at `offset` in an `n` x `n`
    /// grid.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not smaller than `n`.
    pub fn new(family: Family, n: usize, offset: usize) -> Self {
        assert!(offset < n, "diagonal offset {offset} out of range for size {n}");
        Self { family, offset, n }
    }

    /// Family of this diagonal.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Start offset (a row for side-edge families, a column for top-edge ones).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of cells from the start cell to the far edge.
    pub fn len(&self) -> usize {
        match self.family {
            Family::ForwardFromLeft | Family::BackwardFromRight | Family::ForwardFromTop => {
                self.n - self.offset
            }
            Family::BackwardFromTop => self.offset + 1,
        }
    }

    /// Check if the diagonal has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `k`-th cell along the diagonal, counting from the start cell.
    pub fn cell(&self, k: usize) -> Cell {
        debug_assert!(k < self.len());
        let (o, last) = (self.offset, self.n - 1);
        match self.family {
            Family::ForwardFromLeft => Cell::new(o + k, k),
            Family::BackwardFromRight => Cell::new(o + k, last - k),
            Family::ForwardFromTop => Cell::new(k, o + k),
            Family::BackwardFromTop => Cell::new(k, o - k),
        }
    }

    /// Cells along the diagonal, from the start cell outward.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|k| self.cell(k))
    }

    /// First `len` cells along the diagonal.
    pub fn run(&self, len: usize) -> impl Iterator<Item = Cell> + '_ {
        self.cells().take(len)
    }
}

/// Check every run of two or more cells from the start of `diagonal`.
///
/// Each candidate length is summed from scratch. Matching runs have all of
/// their cells marked in `markers`, and every candidate is recorded in
/// `stats`.
pub fn scan_diagonal(
    grid: &Grid,
    target: u64,
    diagonal: &Diagonal,
    markers: &mut MarkerGrid,
    stats: &mut WorkerStats,
) {
    for len in 2..=diagonal.len() {
        let sum: u64 = diagonal.run(len).map(|cell| u64::from(grid[cell])).sum();
        let matched = sum == target;
        stats.record_run(matched);

        if matched {
            for cell in diagonal.run(len) {
                markers.mark(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(diagonal: Diagonal) -> Vec<(usize, usize)> {
        diagonal.cells().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn test_family_offsets() {
        assert_eq!(Family::ForwardFromLeft.offsets(4), 0..4);
        assert_eq!(Family::BackwardFromRight.offsets(4), 0..4);
        assert_eq!(Family::ForwardFromTop.offsets(4), 1..4);
        assert_eq!(Family::BackwardFromTop.offsets(4), 0..3);

        assert!(Family::ForwardFromTop.offsets(1).is_empty());
        assert!(Family::BackwardFromTop.offsets(1).is_empty());
    }

    #[test]
    fn test_family_edge_groups() {
        assert!(Family::TOP_EDGE.iter().all(|f| f.is_top_edge()));
        assert!(Family::ROW_EDGE.iter().all(|f| !f.is_top_edge()));
    }

    #[test]
    fn test_diagonal_cells() {
        assert_eq!(
            cells(Diagonal::new(Family::ForwardFromLeft, 4, 1)),
            vec![(1, 0), (2, 1), (3, 2)]
        );
        assert_eq!(
            cells(Diagonal::new(Family::BackwardFromRight, 4, 2)),
            vec![(2, 3), (3, 2)]
        );
        assert_eq!(
            cells(Diagonal::new(Family::ForwardFromTop, 4, 1)),
            vec![(0, 1), (1, 2), (2, 3)]
        );
        assert_eq!(
            cells(Diagonal::new(Family::BackwardFromTop, 4, 2)),
            vec![(0, 2), (1, 1), (2, 0)]
        );
    }

    #[test]
    fn test_diagonal_lengths_stay_in_bounds() {
        let n = 5;
        for family in Family::ALL {
            for offset in family.offsets(n) {
                let diagonal = Diagonal::new(family, n, offset);
                assert!(!diagonal.is_empty());
                for cell in diagonal.cells() {
                    assert!(cell.row < n && cell.col < n, "{family:?} {offset} -> {cell:?}");
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_diagonal_offset_out_of_range() {
        Diagonal::new(Family::ForwardFromLeft, 3, 3);
    }

    #[test]
    fn test_scan_diagonal_marks_matching_prefixes() {
        let grid = Grid::from_rows(vec![
            vec![2, 0, 0],
            vec![0, 3, 0],
            vec![0, 0, 5],
        ])
        .unwrap();
        let diagonal = Diagonal::new(Family::ForwardFromLeft, 3, 0);

        let mut markers = MarkerGrid::new(3);
        let mut stats = WorkerStats::new(0, 0..3, false);
        scan_diagonal(&grid, 5, &diagonal, &mut markers, &mut stats);

        // 2+3 matches, 2+3+5 does not.
        assert_eq!(markers.to_string(), "100\n010\n000\n");
        assert_eq!(stats.runs_checked, 2);
        assert_eq!(stats.runs_matched, 1);
    }

    #[test]
    fn test_scan_diagonal_zero_target_on_zero_run() {
        let grid = Grid::from_rows(vec![vec![0, 0], vec![0, 0]]).unwrap();
        let diagonal = Diagonal::new(Family::BackwardFromRight, 2, 0);

        let mut markers = MarkerGrid::new(2);
        let mut stats = WorkerStats::new(0, 0..2, false);
        scan_diagonal(&grid, 0, &diagonal, &mut markers, &mut stats);

        assert_eq!(markers.to_string(), "01\n10\n");
    }

    #[test]
    fn test_scan_diagonal_single_cell_checks_nothing() {
        let grid = Grid::from_rows(vec![vec![4, 4], vec![4, 4]]).unwrap();
        let diagonal = Diagonal::new(Family::ForwardFromLeft, 2, 1);
        assert_eq!(diagonal.len(), 1);

        let mut markers = MarkerGrid::new(2);
        let mut stats = WorkerStats::new(0, 1..2, false);
        scan_diagonal(&grid, 4, &diagonal, &mut markers, &mut stats);

        assert_eq!(stats.runs_checked, 0);
        assert_eq!(markers.marked_count(), 0);
    }
}
