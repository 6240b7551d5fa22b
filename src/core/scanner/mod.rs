//! # Scanner Module
//!
//! Discovers image files under the input directory.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - BMP (.bmp)
//! - TGA (.tga)
//! - GIF (.gif)
//!
//! Discovery order is deterministic: results are sorted by path, so serial
//! and parallel runs over the same directory always see the identical file
//! list. Duplicate grouping depends on this.

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{DirectoryScanner, ScanConfig};

use crate::error::ScanError;

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Discovered image files, sorted by path
    pub files: Vec<std::path::PathBuf>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}
