//! End-to-end tests over real files on disk.
//!
//! These exercise the full path: scan a directory, process every file with
//! both strategies, write thumbnails, and group duplicates.

use image::{ImageBuffer, Luma, Rgb};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thumb_dedup::core::batch::BatchScheduler;
use thumb_dedup::core::grouper::GroupKind;
use thumb_dedup::core::pipeline::{execute_run, RunConfig};
use thumb_dedup::core::scanner::{DirectoryScanner, ScanConfig};
use thumb_dedup::core::stats::RunComparison;
use thumb_dedup::events::null_sender;

fn write_gradient(dir: &Path, name: &str, seed: u8) -> PathBuf {
    let path = dir.join(name);
    let img = ImageBuffer::from_fn(48, 48, |x, y| {
        Rgb([
            seed.wrapping_add((x * 5) as u8),
            seed.wrapping_add((y * 3) as u8),
            seed,
        ])
    });
    img.save(&path).unwrap();
    path
}

fn run_config(output_dir: &Path, threshold: u32) -> RunConfig {
    RunConfig {
        output_dir: output_dir.to_path_buf(),
        thumbnail_size: 24,
        threshold,
    }
}

fn scan(dir: &Path) -> Vec<PathBuf> {
    DirectoryScanner::new(ScanConfig::default())
        .scan(dir)
        .unwrap()
        .files
}

#[test]
fn serial_and_parallel_agree_on_everything() {
    let input = TempDir::new().unwrap();
    let serial_out = TempDir::new().unwrap();
    let parallel_out = TempDir::new().unwrap();

    for i in 0..6u8 {
        write_gradient(input.path(), &format!("img_{}.png", i), i.wrapping_mul(40));
    }
    // One byte-identical copy to guarantee an exact group
    let original = input.path().join("img_0.png");
    std::fs::copy(&original, input.path().join("img_copy.png")).unwrap();

    let files = scan(input.path());
    assert_eq!(files.len(), 7);

    let serial = execute_run(
        &files,
        &BatchScheduler::serial(),
        &run_config(serial_out.path(), 8),
        &null_sender(),
    )
    .unwrap();

    let parallel = execute_run(
        &files,
        &BatchScheduler::parallel(4),
        &run_config(parallel_out.path(), 8),
        &null_sender(),
    )
    .unwrap();

    // Same records in the same order
    assert_eq!(serial.records, parallel.records);
    // Same groups, same duplicate count
    assert_eq!(serial.groups, parallel.groups);
    assert_eq!(serial.stats.duplicates, parallel.stats.duplicates);

    let comparison = RunComparison::between(serial.stats, parallel.stats);
    assert!(comparison.duplicates_match);
}

#[test]
fn thumbnails_are_written_with_expected_names() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_gradient(input.path(), "holiday.png", 10);
    write_gradient(input.path(), "beach.png", 200);

    let files = scan(input.path());
    let outcome = execute_run(
        &files,
        &BatchScheduler::serial(),
        &run_config(output.path(), 8),
        &null_sender(),
    )
    .unwrap();

    assert_eq!(outcome.stats.succeeded, 2);
    assert!(output.path().join("holiday_thumb.jpg").exists());
    assert!(output.path().join("beach_thumb.jpg").exists());

    // Thumbnails decode back as valid JPEGs within the size bound
    let thumb = image::open(output.path().join("holiday_thumb.jpg")).unwrap();
    assert!(thumb.width() <= 24 && thumb.height() <= 24);
}

#[test]
fn exact_copies_form_an_exact_group() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let original = write_gradient(input.path(), "a.png", 42);
    std::fs::copy(&original, input.path().join("b.png")).unwrap();
    std::fs::copy(&original, input.path().join("c.png")).unwrap();
    write_gradient(input.path(), "unrelated.png", 200);

    let files = scan(input.path());
    let outcome = execute_run(
        &files,
        &BatchScheduler::serial(),
        &run_config(output.path(), 8),
        &null_sender(),
    )
    .unwrap();

    let exact: Vec<_> = outcome
        .groups
        .iter()
        .filter(|g| g.kind == GroupKind::Exact)
        .collect();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].members.len(), 3);
    assert_eq!(exact[0].score, 0);
    // Three copies, one kept: two duplicates
    assert_eq!(outcome.stats.duplicates, 2);
}

#[test]
fn corrupt_file_does_not_poison_the_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_gradient(input.path(), "good.png", 1);
    std::fs::write(input.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();
    write_gradient(input.path(), "also_good.png", 130);

    let files = scan(input.path());
    assert_eq!(files.len(), 3);

    let outcome = execute_run(
        &files,
        &BatchScheduler::parallel(2),
        &run_config(output.path(), 8),
        &null_sender(),
    )
    .unwrap();

    assert_eq!(outcome.stats.succeeded, 2);
    assert_eq!(outcome.stats.failed, 1);

    let failed: Vec<_> = outcome.records.iter().filter(|r| !r.ok).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0].path.ends_with("broken.jpg"));
}

#[test]
fn scan_skips_non_image_files() {
    let input = TempDir::new().unwrap();

    write_gradient(input.path(), "photo.png", 10);
    std::fs::write(input.path().join("notes.txt"), b"not an image").unwrap();
    std::fs::write(input.path().join("data.bin"), [0u8; 16]).unwrap();

    let files = scan(input.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("photo.png"));
}

/// 9x8 grayscale image whose pixels map one-to-one onto the dHash sample
/// grid. Each row descends left to right; rows listed in `dark_first_rows`
/// get a dark first pixel instead, which clears one hash bit per row.
fn write_grid_image(dir: &Path, name: &str, dark_first_rows: &[u32]) -> PathBuf {
    let path = dir.join(name);
    let img = ImageBuffer::from_fn(9, 8, |x, y| {
        if x == 0 && dark_first_rows.contains(&y) {
            Luma([100u8])
        } else {
            Luma([(200 - x * 10) as u8])
        }
    });
    img.save(&path).unwrap();
    path
}

#[test]
fn near_duplicates_group_within_threshold() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // flat_b differs from flat_a in exactly three hash bits
    write_grid_image(input.path(), "flat_a.png", &[]);
    write_grid_image(input.path(), "flat_b.png", &[0, 1, 2]);
    write_gradient(input.path(), "noise.png", 77);

    let files = scan(input.path());
    let outcome = execute_run(
        &files,
        &BatchScheduler::serial(),
        &run_config(output.path(), 10),
        &null_sender(),
    )
    .unwrap();

    let near: Vec<_> = outcome
        .groups
        .iter()
        .filter(|g| g.kind == GroupKind::Near)
        .collect();
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].members.len(), 2);
    assert_eq!(near[0].score, 10);
    assert!(near[0].members[0].ends_with("flat_a.png"));
    assert!(near[0].members[1].ends_with("flat_b.png"));
}
