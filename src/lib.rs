//! # thumb-dedup
//!
//! Scans a directory of images, writes a thumbnail per file, fingerprints
//! every file two ways (exact content digest + 64-bit perceptual dHash),
//! groups exact and near duplicates, and benchmarks a serial strategy
//! against a fixed-size worker pool over the same corpus.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation
//! layers:
//! - `core` - fingerprinting, grouping, and the batch engine
//! - `events` - progress reporting over a channel (GUI-ready)
//! - `error` - typed errors per concern
//! - `cli` - command-line interface

pub mod cli;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
