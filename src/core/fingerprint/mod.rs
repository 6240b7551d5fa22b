//! # Fingerprint Module
//!
//! Computes the two per-file fingerprints the duplicate grouper consumes:
//!
//! - **Content digest** - blake3 over the raw file bytes; identical digests
//!   mean byte-identical files.
//! - **Difference hash (dHash)** - a 64-bit structural fingerprint derived
//!   from relative brightness of adjacent downsampled pixels; small Hamming
//!   distance means visually similar images.
//!
//! Both are pure functions with no instance state.

mod content;
mod dhash;

pub use content::content_digest;
pub use dhash::{dhash, hamming_distance, DHASH_BITS};
