//! # Batch Module
//!
//! Maps a per-file processing function over an ordered file list, either on
//! the calling thread or on a fixed-size rayon worker pool.
//!
//! ## Ordering guarantee
//! The output vector is indexed by each file's position in the *input* list,
//! never by completion order. Rayon's indexed parallel iterator writes each
//! result into its own pre-sized slot, so slots never alias and no locking
//! is needed. Re-running the grouper over serial and parallel output
//! therefore yields identical groups.
//!
//! ## Work distribution
//! Files are handed to the next free worker dynamically (work stealing)
//! rather than split statically, because per-file cost varies with image
//! size. Files are independent; the only synchronization point is the final
//! join. There is no cancellation or timeout: a run completes in full.

use crate::core::grouper::ImageRecord;
use crate::error::BatchError;
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Execution strategy for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One worker on the calling thread
    Serial,
    /// A fixed pool of workers
    Parallel,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Serial => write!(f, "serial"),
            Strategy::Parallel => write!(f, "parallel"),
        }
    }
}

/// Drives fingerprint computation across one or many workers.
pub struct BatchScheduler {
    strategy: Strategy,
    workers: usize,
}

impl BatchScheduler {
    /// A scheduler that processes files one at a time on the calling thread
    pub fn serial() -> Self {
        Self {
            strategy: Strategy::Serial,
            workers: 1,
        }
    }

    /// A scheduler with a fixed pool of `workers` threads.
    ///
    /// `workers == 0` means use all available parallelism.
    pub fn parallel(workers: usize) -> Self {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            workers
        };

        Self {
            strategy: Strategy::Parallel,
            workers,
        }
    }

    /// The execution strategy of this scheduler
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of workers this scheduler will use
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Process every file exactly once and collect records in input order.
    ///
    /// `process` must map a path to its record without panicking; per-file
    /// failures are expressed as records with `ok == false`, so one bad file
    /// never aborts its siblings or the batch.
    pub fn run<F>(&self, files: &[PathBuf], process: F) -> Result<Vec<ImageRecord>, BatchError>
    where
        F: Fn(&Path) -> ImageRecord + Send + Sync,
    {
        match self.strategy {
            Strategy::Serial => Ok(files.iter().map(|path| process(path)).collect()),
            Strategy::Parallel => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.workers)
                    .build()?;

                // par_iter over a slice is indexed: collect preserves input
                // order regardless of which worker finishes first
                Ok(pool.install(|| files.par_iter().map(|path| process(path)).collect()))
            }
        }
    }
}

/// Success/failure tallies for one batch run.
///
/// Derived from the collected record vector after all workers have joined;
/// workers never touch a shared counter on the hot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchTally {
    /// Records with `ok == true`
    pub succeeded: usize,
    /// Records with `ok == false`
    pub failed: usize,
}

impl BatchTally {
    /// Tally a collected record sequence
    pub fn from_records(records: &[ImageRecord]) -> Self {
        let succeeded = records.iter().filter(|r| r.ok).count();
        Self {
            succeeded,
            failed: records.len() - succeeded,
        }
    }
}
