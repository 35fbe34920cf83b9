//! Diagonal-sum scanning engine for diagsum.
//!
//! Given a square grid of digits and a target, the engine marks every cell
//! that lies on a diagonal run of two or more cells summing to the target.
//!
//! # Overview
//!
//! - **Four diagonal families** (forward from the left edge, backward from
//!   the right edge, forward and backward from the top edge) cover every
//!   diagonal exactly once
//! - **Static partitioning**: rows are split into 1 to 3 contiguous ranges,
//!   one per worker, computed up front
//! - **Thread-count independent**: the marker grid is identical for any
//!   number of workers
//!
//! # Example
//!
//! ```rust
//! use diagsum_scan::{compute_diagonal_sums, Grid};
//!
//! let grid: Grid = "111\n111\n111\n".parse().unwrap();
//! let markers = compute_diagonal_sums(&grid, 2, 3).unwrap();
//!
//! assert_eq!(markers.to_string(), "111\n111\n010\n");
//! ```
//!
//! # Reports
//!
//! [`DiagonalScanner`] returns a full [`ScanReport`] with per-worker counts:
//!
//! ```rust
//! use diagsum_scan::{DiagonalScanner, Grid, ScanConfig};
//!
//! let grid: Grid = "1234\n5678\n9012\n3456\n".parse().unwrap();
//! let config = ScanConfig::builder().target_sum(10u64).threads(2usize).build().unwrap();
//! let report = DiagonalScanner::with_config(config).scan(&grid).unwrap();
//!
//! println!("{} runs matched", report.stats.runs_matched);
//! ```

mod diagonal;
mod partition;
mod scanner;

pub use diagonal::{scan_diagonal, Diagonal, Family};
pub use partition::{split_rows, Assignment, WorkPlan};
pub use scanner::{compute_diagonal_sums, DiagonalScanner};

// Re-export core types for convenience
pub use diagsum_core::{
    Cell, Grid, GridError, MarkerGrid, ScanConfig, ScanError, ScanReport, ScanStats, WorkerStats,
};
