//! # thumb-dedup CLI
//!
//! Command-line interface for the thumbnail/dedup benchmark.
//!
//! ## Usage
//! ```bash
//! thumb-dedup --input ./photos
//! thumb-dedup --input ./photos --mode parallel --workers 8 --threshold 5
//! ```

use thumb_dedup::Result;

fn main() -> Result<()> {
    thumb_dedup::init_tracing();
    thumb_dedup::cli::run()
}
