//! Core types for diagsum.
//!
//! This crate provides the data structures shared by the scanning engine and
//! the command line front end: the digit grid, the marker grid the engine
//! fills in, scan configuration, error types, the scan report, and the
//! plain-text grid format.

mod config;
mod error;
mod format;
mod grid;
mod report;

pub use config::{ScanConfig, ScanConfigBuilder, MAX_THREADS, MIN_THREADS};
pub use error::{GridError, ScanError};
pub use format::{parse_grid, read_grid, write_grid, write_markers};
pub use grid::{Cell, Grid, MarkerGrid, MAX_DIGIT};
pub use report::{ScanReport, ScanStats, WorkerStats};
