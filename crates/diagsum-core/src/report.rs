//! Scan report and statistics.

use std::ops::Range;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::grid::MarkerGrid;

/// Work done by a single worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerStats {
    /// Worker index, 0-based.
    pub worker: usize,
    /// Rows whose edge diagonals this worker checked.
    pub rows: Range<usize>,
    /// Whether this worker also checked the top-edge diagonals.
    pub top_edge: bool,
    /// Number of candidate runs evaluated.
    pub runs_checked: u64,
    /// Number of candidate runs whose sum matched.
    pub runs_matched: u64,
}

impl WorkerStats {
    /// Create empty stats for a worker.
    pub fn new(worker: usize, rows: Range<usize>, top_edge: bool) -> Self {
        Self {
            worker,
            rows,
            top_edge,
            runs_checked: 0,
            runs_matched: 0,
        }
    }

    /// Record one evaluated candidate run.
    pub fn record_run(&mut self, matched: bool) {
        self.runs_checked += 1;
        if matched {
            self.runs_matched += 1;
        }
    }
}

/// Summary statistics for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Grid size n (the grid is n x n).
    pub grid_size: usize,
    /// Total candidate runs evaluated.
    pub runs_checked: u64,
    /// Total candidate runs whose sum matched.
    pub runs_matched: u64,
    /// Cells lying on at least one matching run.
    pub cells_marked: u64,
}

impl ScanStats {
    /// Create new empty stats for a grid of size `n`.
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Fold in the counts from one worker.
    pub fn absorb(&mut self, worker: &WorkerStats) {
        self.runs_checked += worker.runs_checked;
        self.runs_matched += worker.runs_matched;
    }

    /// Fraction of the grid that is marked, in `0.0..=1.0`.
    pub fn marked_ratio(&self) -> f64 {
        let total = (self.grid_size * self.grid_size) as f64;
        if total > 0.0 {
            self.cells_marked as f64 / total
        } else {
            0.0
        }
    }
}

/// Complete result of a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Cells lying on at least one matching run.
    pub markers: MarkerGrid,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: ScanStats,

    /// Per-worker statistics, in worker order.
    pub workers: Vec<WorkerStats>,

    /// Duration of the scan.
    pub scan_duration: Duration,
}

impl ScanReport {
    /// Create a new report. Totals are derived from the worker stats and the
    /// marker grid.
    pub fn new(
        markers: MarkerGrid,
        config: ScanConfig,
        workers: Vec<WorkerStats>,
        scan_duration: Duration,
    ) -> Self {
        let mut stats = ScanStats::new(markers.size());
        for worker in &workers {
            stats.absorb(worker);
        }
        stats.cells_marked = markers.marked_count() as u64;

        Self {
            markers,
            config,
            stats,
            workers,
            scan_duration,
        }
    }

    /// Consume the report, keeping only the marker grid.
    pub fn into_markers(self) -> MarkerGrid {
        self.markers
    }

    /// Check if any run matched the target.
    pub fn has_matches(&self) -> bool {
        self.stats.runs_matched > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_worker_stats_record_run() {
        let mut stats = WorkerStats::new(0, 0..2, true);
        stats.record_run(false);
        stats.record_run(true);

        assert_eq!(stats.runs_checked, 2);
        assert_eq!(stats.runs_matched, 1);
    }

    #[test]
    fn test_report_totals() {
        let mut markers = MarkerGrid::new(2);
        markers.mark(Cell::new(0, 0));
        markers.mark(Cell::new(1, 1));

        let mut first = WorkerStats::new(0, 0..1, true);
        first.record_run(true);
        first.record_run(false);
        let mut second = WorkerStats::new(1, 1..2, false);
        second.record_run(false);

        let report = ScanReport::new(
            markers,
            ScanConfig::new(4).with_threads(2),
            vec![first, second],
            Duration::from_millis(3),
        );

        assert_eq!(report.stats.grid_size, 2);
        assert_eq!(report.stats.runs_checked, 3);
        assert_eq!(report.stats.runs_matched, 1);
        assert_eq!(report.stats.cells_marked, 2);
        assert!((report.stats.marked_ratio() - 0.5).abs() < f64::EPSILON);
        assert!(report.has_matches());
    }
}
