//! Error types for grid loading and scanning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or loading a grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// The grid has no cells.
    #[error("Grid is empty")]
    Empty,

    /// A row does not have as many cells as the grid has rows.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The number of rows does not match the row width.
    #[error("Grid has {found} rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    /// A cell buffer does not hold exactly n x n values.
    #[error("Cell buffer has {found} values, expected {expected}")]
    CellCount { expected: usize, found: usize },

    /// A character in the text form is not a decimal digit.
    #[error("Invalid character {found:?} at row {row}, column {col}")]
    InvalidDigit { row: usize, col: usize, found: char },

    /// A cell value is larger than a single digit.
    #[error("Value {value} at row {row}, column {col} is not a single digit")]
    DigitOutOfRange { row: usize, col: usize, value: u8 },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GridError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors that can occur during a diagonal scan.
///
/// Every variant is fatal: the engine never hands back a partially
/// populated marker grid.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The marker grid could not be allocated.
    #[error("Failed to allocate marker grid of {cells} cells")]
    Allocation {
        cells: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// The worker pool could not be started.
    #[error("Failed to start worker threads: {message}")]
    WorkerSpawn { message: String },

    /// A worker panicked before it could be joined.
    #[error("Worker {worker} panicked: {message}")]
    WorkerPanicked { worker: usize, message: String },
}

impl ScanError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
