//! Static row partitioning across workers.

use std::ops::Range;

use diagsum_core::{ScanError, MAX_THREADS, MIN_THREADS};

use crate::diagonal::{Diagonal, Family};

/// Split `0..n` into `parts` contiguous ranges in row order.
///
/// Every range gets `n / parts` rows and the first `n % parts` ranges get one
/// more. Ranges are empty when there are fewer rows than parts.
pub fn split_rows(n: usize, parts: usize) -> Vec<Range<usize>> {
    if parts == 0 {
        return Vec::new();
    }

    let base = n / parts;
    let extra = n % parts;
    let mut start = 0;

    (0..parts)
        .map(|i| {
            let len = base + usize::from(i < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// The work given to one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Worker index, 0-based.
    pub worker: usize,
    /// Rows whose side-edge diagonals this worker checks.
    pub rows: Range<usize>,
    /// Whether this worker also checks the top-edge diagonals.
    pub top_edge: bool,
}

impl Assignment {
    /// Diagonals this worker checks, in order: both side-edge diagonals for
    /// each of its rows, then (for the top-edge owner) every forward and then
    /// every backward top-edge diagonal.
    pub fn diagonals(&self, n: usize) -> impl Iterator<Item = Diagonal> + use<> {
        let rows = self
            .rows
            .clone()
            .flat_map(move |row| Family::ROW_EDGE.map(|family| Diagonal::new(family, n, row)));

        let top: &'static [Family] = if self.top_edge { &Family::TOP_EDGE } else { &[] };
        let top = top.iter().flat_map(move |&family| {
            family
                .offsets(n)
                .map(move |offset| Diagonal::new(family, n, offset))
        });

        rows.chain(top)
    }
}

/// A fixed assignment of rows to workers for one grid size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPlan {
    grid_size: usize,
    assignments: Vec<Assignment>,
}

impl WorkPlan {
    /// Plan a scan of an `n` x `n` grid over `threads` workers.
    ///
    /// Worker 0 owns the range starting at row 0 and the top-edge families.
    pub fn new(n: usize, threads: usize) -> Result<Self, ScanError> {
        if !(MIN_THREADS..=MAX_THREADS).contains(&threads) {
            return Err(ScanError::invalid_config(format!(
                "threads must be between {MIN_THREADS} and {MAX_THREADS}, got {threads}"
            )));
        }

        let assignments = split_rows(n, threads)
            .into_iter()
            .enumerate()
            .map(|(worker, rows)| Assignment {
                worker,
                rows,
                top_edge: worker == 0,
            })
            .collect();

        Ok(Self {
            grid_size: n,
            assignments,
        })
    }

    /// Grid size this plan was built for.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Per-worker assignments, in worker order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Number of workers.
    pub fn worker_count(&self) -> usize {
        self.assignments.len()
    }
}
