//! # Error Module
//!
//! Error types for the thumbnail/dedup tool.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file failures stay per-file** - only setup problems are fatal

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    #[error("No image files found in {path}")]
    NoInputFiles { path: PathBuf },

    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur during image discovery
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the decode/resize/encode collaborator
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to resize image {path}: {reason}")]
    Resize { path: PathBuf, reason: String },

    #[error("Failed to encode thumbnail {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write thumbnail {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the batch scheduler
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;
