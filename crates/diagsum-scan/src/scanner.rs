//! Parallel diagonal-sum scanner.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use tracing::{debug, trace};

use diagsum_core::{Grid, MarkerGrid, ScanConfig, ScanError, ScanReport, WorkerStats};

use crate::diagonal::scan_diagonal;
use crate::partition::{Assignment, WorkPlan};

/// Scanner that marks every diagonal run summing to a target.
///
/// Rows are split into one contiguous range per worker. Each worker checks
/// the side-edge diagonals starting in its rows; worker 0 also checks the
/// top-edge diagonals. A diagonal may run into rows owned by another worker,
/// so each worker marks a private grid and the results are merged once every
/// worker has finished.
#[derive(Debug, Clone)]
pub struct DiagonalScanner {
    config: ScanConfig,
}

impl DiagonalScanner {
    /// Create a single-threaded scanner for the given target.
    pub fn new(target_sum: u64) -> Self {
        Self::with_config(ScanConfig::new(target_sum))
    }

    /// Create a scanner with custom configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `grid` and return the marker grid with statistics.
    pub fn scan(&self, grid: &Grid) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        self.config.validate()?;

        let n = grid.size();
        let plan = WorkPlan::new(n, self.config.threads)?;
        debug!(
            grid_size = n,
            target = self.config.target_sum,
            workers = plan.worker_count(),
            "Starting diagonal scan"
        );

        let mut markers = MarkerGrid::try_new(n)?;
        let workers = self.execute(grid, &plan, &mut markers)?;

        let scan_duration = start.elapsed();
        let report = ScanReport::new(markers, self.config.clone(), workers, scan_duration);
        debug!(
            runs_checked = report.stats.runs_checked,
            runs_matched = report.stats.runs_matched,
            cells_marked = report.stats.cells_marked,
            elapsed_ms = scan_duration.as_millis() as u64,
            "Diagonal scan complete"
        );

        Ok(report)
    }

    /// Run every assignment of `plan`, leaving the merged marks in `markers`.
    fn execute(
        &self,
        grid: &Grid,
        plan: &WorkPlan,
        markers: &mut MarkerGrid,
    ) -> Result<Vec<WorkerStats>, ScanError> {
        let target = self.config.target_sum;

        match plan.assignments() {
            // A lone worker runs on the calling thread.
            [only] => Ok(vec![run_worker(grid, target, only, markers)]),
            assignments => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(assignments.len())
                    .thread_name(|i| format!("diagsum-worker-{i}"))
                    .build()
                    .map_err(|e| ScanError::WorkerSpawn {
                        message: e.to_string(),
                    })?;

                // Every pool thread runs exactly one assignment; broadcast
                // returns only after all of them have finished.
                let results = pool.broadcast(|ctx| -> Result<_, ScanError> {
                    let assignment = &assignments[ctx.index()];
                    let mut local = MarkerGrid::try_new(grid.size())?;
                    let stats = panic::catch_unwind(AssertUnwindSafe(|| {
                        run_worker(grid, target, assignment, &mut local)
                    }))
                    .map_err(|payload| ScanError::WorkerPanicked {
                        worker: assignment.worker,
                        message: panic_message(payload.as_ref()),
                    })?;
                    Ok((local, stats))
                });

                let mut workers = Vec::with_capacity(results.len());
                for result in results {
                    let (local, stats) = result?;
                    markers.merge(&local);
                    workers.push(stats);
                }
                Ok(workers)
            }
        }
    }
}

/// Check every diagonal in `assignment`, marking matches into `markers`.
fn run_worker(
    grid: &Grid,
    target: u64,
    assignment: &Assignment,
    markers: &mut MarkerGrid,
) -> WorkerStats {
    let mut stats = WorkerStats::new(
        assignment.worker,
        assignment.rows.clone(),
        assignment.top_edge,
    );

    for diagonal in assignment.diagonals(grid.size()) {
        scan_diagonal(grid, target, &diagonal, markers, &mut stats);
    }

    trace!(
        worker = assignment.worker,
        rows = ?assignment.rows,
        top_edge = assignment.top_edge,
        runs_checked = stats.runs_checked,
        runs_matched = stats.runs_matched,
        "Worker finished"
    );
    stats
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Mark every diagonal run of `input` that sums to `target_sum`, using
/// `thread_count` workers (1 to 3).
///
/// The result does not depend on `thread_count`.
pub fn compute_diagonal_sums(
    input: &Grid,
    target_sum: u64,
    thread_count: usize,
) -> Result<MarkerGrid, ScanError> {
    let config = ScanConfig::new(target_sum).with_threads(thread_count);
    DiagonalScanner::with_config(config)
        .scan(input)
        .map(ScanReport::into_markers)
}
