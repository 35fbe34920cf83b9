//! Scan configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Fewest worker threads a scan may use.
pub const MIN_THREADS: usize = 1;

/// Most worker threads a scan may use.
pub const MAX_THREADS: usize = 3;

/// Configuration for a diagonal scan.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Sum a diagonal run must reach exactly to be marked.
    pub target_sum: u64,

    /// Number of worker threads, between 1 and 3.
    #[builder(default = "1")]
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_threads() -> usize {
    MIN_THREADS
}

fn check_threads(threads: usize) -> Result<(), String> {
    if (MIN_THREADS..=MAX_THREADS).contains(&threads) {
        Ok(())
    } else {
        Err(format!(
            "threads must be between {MIN_THREADS} and {MAX_THREADS}, got {threads}"
        ))
    }
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.target_sum.is_none() {
            return Err("Target sum is required".to_string());
        }
        if let Some(threads) = self.threads {
            check_threads(threads)?;
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a single-threaded config for the given target.
    pub fn new(target_sum: u64) -> Self {
        Self {
            target_sum,
            threads: MIN_THREADS,
        }
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Check a config that did not come through the builder.
    pub fn validate(&self) -> Result<(), ScanError> {
        check_threads(self.threads).map_err(ScanError::invalid_config)
    }
}
