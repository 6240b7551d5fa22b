//! # Events Module
//!
//! Progress events emitted by the core library.
//!
//! The CLI subscribes to these to drive its progress bar; a GUI could do the
//! same. Event delivery is best-effort: if nobody is listening, events are
//! silently dropped and the run proceeds unchanged.

mod channel;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Discovery phase events
    Scan(ScanEvent),
    /// Batch processing events
    Batch(BatchEvent),
}

/// Events during the discovery phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { path: PathBuf },
    /// An image file was found
    FileFound { path: PathBuf },
    /// An error occurred but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_files: usize },
}

/// Events during batch processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    /// A batch run has started
    Started {
        strategy: String,
        total_files: usize,
        workers: usize,
    },
    /// One file finished processing (successfully or not)
    FileProcessed { path: PathBuf, ok: bool },
    /// All workers have joined
    Completed { succeeded: usize, failed: usize },
}
