//! # Pipeline Module
//!
//! Orchestrates one run: dispatch the batch, group the ordered records, and
//! snapshot the statistics.
//!
//! Per-file work is decode, dHash, thumbnail write, then content digest. A
//! decode or thumbnail failure marks that file's record failed and moves on;
//! the batch never aborts for a single file. Grouping runs single-threaded
//! only after the full worker pool has joined, so its output depends on the
//! input order alone, never on the worker count.

use crate::core::batch::{BatchScheduler, BatchTally};
use crate::core::codec::{self, THUMBNAIL_JPEG_QUALITY};
use crate::core::fingerprint::{content_digest, dhash};
use crate::core::grouper::{duplicate_count, DuplicateGroup, DuplicateGrouper, ImageRecord};
use crate::core::stats::{PerformanceRecorder, RunStatistics};
use crate::error::Result;
use crate::events::{BatchEvent, Event, EventSender};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory thumbnails are written into (must already exist)
    pub output_dir: PathBuf,
    /// Longest side of generated thumbnails, in pixels
    pub thumbnail_size: u32,
    /// Hamming distance threshold for near-duplicate grouping
    pub threshold: u32,
}

/// Everything produced by one run
#[derive(Debug)]
pub struct RunOutcome {
    /// Per-file records in discovery order
    pub records: Vec<ImageRecord>,
    /// Duplicate groups over the ordered records
    pub groups: Vec<DuplicateGroup>,
    /// Timing and tallies for the run
    pub stats: RunStatistics,
}

/// Thumbnail path for an input file: `<output_dir>/<stem>_thumb.jpg`
pub fn thumbnail_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}_thumb.jpg", stem))
}

/// Process one file into its fingerprint record.
///
/// Never returns an error: failures become records with `ok == false` so
/// sibling files keep processing.
pub fn process_file(path: &Path, config: &RunConfig) -> ImageRecord {
    let decoded = match codec::decode(path) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to decode image");
            return ImageRecord::failed(path.to_path_buf());
        }
    };

    // The fingerprint comes from the original pixels, not the thumbnail
    let perceptual_hash = dhash(&decoded);

    let out_path = thumbnail_path(path, &config.output_dir);
    let written = codec::thumbnail(&decoded, config.thumbnail_size, path)
        .and_then(|thumb| codec::encode_jpeg(&thumb, &out_path, THUMBNAIL_JPEG_QUALITY));

    if let Err(e) = written {
        warn!(path = %path.display(), error = %e, "failed to write thumbnail");
        return ImageRecord {
            path: path.to_path_buf(),
            content_hash: String::new(),
            perceptual_hash,
            ok: false,
        };
    }

    ImageRecord {
        path: path.to_path_buf(),
        // Empty when the file vanished between decode and digest; the
        // record stays usable for near-duplicate grouping
        content_hash: content_digest(path),
        perceptual_hash,
        ok: true,
    }
}

/// Execute one run over the ordered file list.
///
/// The timer wraps batch processing and grouping for both strategies, so
/// serial and parallel elapsed times measure the same work.
pub fn execute_run(
    files: &[PathBuf],
    scheduler: &BatchScheduler,
    config: &RunConfig,
    events: &EventSender,
) -> Result<RunOutcome> {
    let mut recorder = PerformanceRecorder::new();
    recorder.set_total(files.len());
    recorder.set_workers(scheduler.workers());

    debug!(
        strategy = %scheduler.strategy(),
        workers = scheduler.workers(),
        files = files.len(),
        "starting batch"
    );

    events.send(Event::Batch(BatchEvent::Started {
        strategy: scheduler.strategy().to_string(),
        total_files: files.len(),
        workers: scheduler.workers(),
    }));

    recorder.start();

    let records = scheduler.run(files, |path| {
        let record = process_file(path, config);
        events.send(Event::Batch(BatchEvent::FileProcessed {
            path: path.to_path_buf(),
            ok: record.ok,
        }));
        record
    })?;

    let grouper = DuplicateGrouper::new(config.threshold);
    let groups = grouper.group(&records);

    recorder.stop();

    let tally = BatchTally::from_records(&records);
    recorder.set_outcomes(tally.succeeded, tally.failed);
    recorder.set_duplicates(duplicate_count(&groups));

    events.send(Event::Batch(BatchEvent::Completed {
        succeeded: tally.succeeded,
        failed: tally.failed,
    }));

    debug!(
        succeeded = tally.succeeded,
        failed = tally.failed,
        groups = groups.len(),
        "batch complete"
    );

    Ok(RunOutcome {
        records,
        groups,
        stats: recorder.statistics(),
    })
}
