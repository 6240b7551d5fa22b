//! # Stats Module
//!
//! Timing and throughput bookkeeping for a batch run, and the serial vs
//! parallel comparison.
//!
//! All derived metrics are guarded against division by zero and return 0
//! instead of failing: a run over zero successful files has zero throughput,
//! not an error.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Statistics for one completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Total files in the batch
    pub total: usize,
    /// Files processed successfully
    pub succeeded: usize,
    /// Files that failed to process
    pub failed: usize,
    /// Duplicates found (sum of group sizes minus one per group)
    pub duplicates: usize,
    /// Workers used for the batch
    pub workers: usize,
    /// Wall-clock time for the batch
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Successful images per second; 0 when no time elapsed
    pub fn throughput(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.succeeded as f64 / seconds
        } else {
            0.0
        }
    }

    /// Average milliseconds per successful image; 0 when nothing succeeded
    pub fn avg_latency_ms(&self) -> f64 {
        if self.succeeded > 0 {
            self.elapsed.as_secs_f64() * 1000.0 / self.succeeded as f64
        } else {
            0.0
        }
    }
}

/// Comparison of a serial run against a parallel run over the same corpus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunComparison {
    /// The serial run's statistics
    pub serial: RunStatistics,
    /// The parallel run's statistics
    pub parallel: RunStatistics,
    /// Serial elapsed time divided by parallel elapsed time
    pub speedup: f64,
    /// Speedup divided by worker count, as a percentage
    pub efficiency: f64,
    /// Whether both runs found the same number of duplicates.
    ///
    /// A correctness cross-check on the scheduler's order preservation,
    /// not a performance metric.
    pub duplicates_match: bool,
}

impl RunComparison {
    /// Compare a serial run against a parallel run
    pub fn between(serial: RunStatistics, parallel: RunStatistics) -> Self {
        let parallel_secs = parallel.elapsed.as_secs_f64();
        let speedup = if parallel_secs > 0.0 {
            serial.elapsed.as_secs_f64() / parallel_secs
        } else {
            0.0
        };

        let efficiency = if parallel.workers > 0 {
            speedup / parallel.workers as f64 * 100.0
        } else {
            0.0
        };

        Self {
            serial,
            parallel,
            speedup,
            efficiency,
            duplicates_match: serial.duplicates == parallel.duplicates,
        }
    }
}

/// Timing and tally bookkeeping around one batch run.
///
/// Uses a monotonic clock; `reset` returns the recorder to its initial
/// state before each run.
#[derive(Debug, Default)]
pub struct PerformanceRecorder {
    started_at: Option<Instant>,
    elapsed: Duration,
    total: usize,
    succeeded: usize,
    failed: usize,
    duplicates: usize,
    workers: usize,
}

impl PerformanceRecorder {
    /// Create a recorder with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all counters and timing
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start the monotonic timer
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Stop the timer and latch the elapsed time
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.elapsed = started_at.elapsed();
        }
    }

    /// Record the total batch size
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Record success/failure counts (reduced once, after the join)
    pub fn set_outcomes(&mut self, succeeded: usize, failed: usize) {
        self.succeeded = succeeded;
        self.failed = failed;
    }

    /// Record the duplicate count from the grouping pass
    pub fn set_duplicates(&mut self, duplicates: usize) {
        self.duplicates = duplicates;
    }

    /// Record how many workers the batch used
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    /// Elapsed time: latched if stopped, running total otherwise
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => started_at.elapsed(),
            None => self.elapsed,
        }
    }

    /// Snapshot the recorder into immutable run statistics
    pub fn statistics(&self) -> RunStatistics {
        RunStatistics {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            duplicates: self.duplicates,
            workers: self.workers,
            elapsed: self.elapsed(),
        }
    }
}
