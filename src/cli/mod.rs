//! # CLI Module
//!
//! Command-line interface for the thumbnail/dedup benchmark.
//!
//! ## Usage
//! ```bash
//! # Process a directory with both strategies and compare them
//! thumb-dedup --input ./photos
//!
//! # Custom thumbnail size and threshold
//! thumb-dedup --input ./photos --size 128 --threshold 5
//!
//! # Parallel only, with an explicit worker count
//! thumb-dedup --input ./photos --mode parallel --workers 8
//!
//! # JSON output
//! thumb-dedup --input ./photos --format json
//! ```

use crate::core::batch::BatchScheduler;
use crate::core::fingerprint::DHASH_BITS;
use crate::core::grouper::DuplicateGroup;
use crate::core::pipeline::{execute_run, RunConfig, RunOutcome};
use crate::core::scanner::{DirectoryScanner, ScanConfig};
use crate::core::stats::{RunComparison, RunStatistics};
use crate::error::{DedupError, Result};
use crate::events::{BatchEvent, Event, EventChannel};
use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::thread;

/// Thumbnail generator and duplicate finder with a serial-vs-parallel benchmark
#[derive(Parser, Debug)]
#[command(name = "thumb-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input directory with images
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for thumbnails
    #[arg(short, long, default_value = "./output/thumbnails")]
    output: PathBuf,

    /// Thumbnail size in pixels (longest side)
    #[arg(short, long, default_value = "256")]
    size: u32,

    /// Hamming distance threshold for near duplicates (0-64)
    #[arg(short, long, default_value = "8")]
    threshold: u32,

    /// Number of workers for parallel mode (0 = all available)
    #[arg(short, long, default_value = "0")]
    workers: usize,

    /// Which execution strategies to run
    #[arg(short, long, default_value = "both")]
    mode: Mode,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run only the serial strategy
    Serial,
    /// Run only the parallel strategy
    Parallel,
    /// Run both and compare them
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.threshold > DHASH_BITS {
        return Err(DedupError::Config(format!(
            "threshold must be 0-{}, got {}",
            DHASH_BITS, cli.threshold
        )));
    }

    // Fatal before any processing starts
    fs::create_dir_all(&cli.output).map_err(|e| DedupError::OutputDirectory {
        path: cli.output.clone(),
        source: e,
    })?;

    let term = Term::stderr();
    let pretty = matches!(cli.format, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("thumb-dedup").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line(&format!("Scanning {}", cli.input.display())).ok();
    }

    let scanner = DirectoryScanner::new(ScanConfig::default());
    let scan_result = scanner.scan(&cli.input)?;

    for error in &scan_result.errors {
        term.write_line(&format!("{} {}", style("warning:").yellow(), error))
            .ok();
    }

    let files = scan_result.files;
    if files.is_empty() {
        // Nothing to fingerprint: fatal for the whole run
        return Err(DedupError::NoInputFiles {
            path: cli.input.clone(),
        });
    }

    if pretty {
        term.write_line(&format!(
            "Found {} image files (size {}px, threshold {})",
            style(files.len()).cyan(),
            cli.size,
            cli.threshold
        ))
        .ok();
    }

    let config = RunConfig {
        output_dir: cli.output.clone(),
        thumbnail_size: cli.size,
        threshold: cli.threshold,
    };

    let mut serial_outcome = None;
    let mut parallel_outcome = None;

    if matches!(cli.mode, Mode::Serial | Mode::Both) {
        let scheduler = BatchScheduler::serial();
        serial_outcome = Some(run_with_progress(&files, &scheduler, &config, pretty)?);
    }

    if matches!(cli.mode, Mode::Parallel | Mode::Both) {
        let scheduler = BatchScheduler::parallel(cli.workers);
        parallel_outcome = Some(run_with_progress(&files, &scheduler, &config, pretty)?);
    }

    let comparison = match (&serial_outcome, &parallel_outcome) {
        (Some(serial), Some(parallel)) => {
            Some(RunComparison::between(serial.stats, parallel.stats))
        }
        _ => None,
    };

    match cli.format {
        OutputFormat::Pretty => {
            if let Some(outcome) = &serial_outcome {
                print_statistics(&term, "SERIAL", &outcome.stats);
                print_duplicate_report(&term, &outcome.groups);
            }
            if let Some(outcome) = &parallel_outcome {
                print_statistics(&term, "PARALLEL", &outcome.stats);
                print_duplicate_report(&term, &outcome.groups);
            }
            if let Some(comparison) = &comparison {
                print_comparison(&term, comparison);
            }
            term.write_line(&format!(
                "\nThumbnails saved to {}",
                style(cli.output.display()).cyan()
            ))
            .ok();
        }
        OutputFormat::Json => {
            print_json(&serial_outcome, &parallel_outcome, &comparison);
        }
    }

    Ok(())
}

/// Execute one run with an indicatif progress bar fed from batch events
fn run_with_progress(
    files: &[PathBuf],
    scheduler: &BatchScheduler,
    config: &RunConfig,
    pretty: bool,
) -> Result<RunOutcome> {
    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            if let Some(ref pb) = progress_clone {
                match event {
                    Event::Batch(BatchEvent::Started {
                        strategy, workers, ..
                    }) => {
                        pb.set_message(format!("{} ({} workers)", strategy, workers));
                    }
                    Event::Batch(BatchEvent::FileProcessed { .. }) => {
                        pb.inc(1);
                    }
                    Event::Batch(BatchEvent::Completed { .. }) => {
                        pb.finish_and_clear();
                    }
                    _ => {}
                }
            }
        }
    });

    let outcome = execute_run(files, scheduler, config, &sender);

    drop(sender);
    event_thread.join().ok();

    outcome
}

fn print_statistics(term: &Term, mode_name: &str, stats: &RunStatistics) {
    let line = style("========================================").dim();

    term.write_line("").ok();
    term.write_line(&format!("{}", line)).ok();
    term.write_line(&format!("  {} Mode Statistics", style(mode_name).bold()))
        .ok();
    term.write_line(&format!("{}", line)).ok();
    term.write_line(&format!(
        "  Total Time:       {:.2} seconds",
        stats.elapsed.as_secs_f64()
    ))
    .ok();
    term.write_line(&format!("  Total Images:     {}", stats.total)).ok();
    term.write_line(&format!(
        "  Successful:       {}",
        style(stats.succeeded).green()
    ))
    .ok();
    term.write_line(&format!(
        "  Failed:           {}",
        if stats.failed > 0 {
            style(stats.failed).red()
        } else {
            style(stats.failed).dim()
        }
    ))
    .ok();
    term.write_line(&format!(
        "  Duplicates Found: {}",
        style(stats.duplicates).yellow()
    ))
    .ok();
    term.write_line(&format!("  Workers Used:     {}", stats.workers)).ok();
    term.write_line(&format!(
        "  Throughput:       {:.2} images/sec",
        stats.throughput()
    ))
    .ok();
    term.write_line(&format!(
        "  Avg Time/Image:   {:.2} ms",
        stats.avg_latency_ms()
    ))
    .ok();
}

fn print_duplicate_report(term: &Term, groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        term.write_line("\n  No duplicates found.").ok();
        return;
    }

    term.write_line(&format!(
        "\n{}",
        style("Duplicate Groups:").bold().underlined()
    ))
    .ok();

    for (i, group) in groups.iter().enumerate() {
        term.write_line(&format!(
            "  {} {} (score {})",
            style(format!("Group {}:", i + 1)).bold(),
            style(group.kind).yellow(),
            group.score
        ))
        .ok();

        for member in &group.members {
            term.write_line(&format!("    - {}", member.display())).ok();
        }
    }
}

fn print_comparison(term: &Term, comparison: &RunComparison) {
    let line = style("========================================").dim();

    term.write_line("").ok();
    term.write_line(&format!("{}", line)).ok();
    term.write_line(&format!(
        "  {}",
        style("SERIAL vs PARALLEL COMPARISON").bold()
    ))
    .ok();
    term.write_line(&format!("{}", line)).ok();

    term.write_line("\n  Execution Time:").ok();
    term.write_line(&format!(
        "    Serial:         {:.2} seconds",
        comparison.serial.elapsed.as_secs_f64()
    ))
    .ok();
    term.write_line(&format!(
        "    Parallel:       {:.2} seconds",
        comparison.parallel.elapsed.as_secs_f64()
    ))
    .ok();

    term.write_line("\n  Throughput:").ok();
    term.write_line(&format!(
        "    Serial:         {:.2} images/sec",
        comparison.serial.throughput()
    ))
    .ok();
    term.write_line(&format!(
        "    Parallel:       {:.2} images/sec",
        comparison.parallel.throughput()
    ))
    .ok();

    term.write_line("\n  Average Time per Image:").ok();
    term.write_line(&format!(
        "    Serial:         {:.2} ms",
        comparison.serial.avg_latency_ms()
    ))
    .ok();
    term.write_line(&format!(
        "    Parallel:       {:.2} ms",
        comparison.parallel.avg_latency_ms()
    ))
    .ok();

    term.write_line("\n  Parallelization:").ok();
    term.write_line(&format!(
        "    Workers Used:   {}",
        comparison.parallel.workers
    ))
    .ok();
    term.write_line(&format!(
        "    Speedup:        {:.2}x",
        comparison.speedup
    ))
    .ok();
    term.write_line(&format!(
        "    Efficiency:     {:.2}%",
        comparison.efficiency
    ))
    .ok();

    term.write_line("\n  Duplicate Detection:").ok();
    term.write_line(&format!(
        "    Serial Found:   {}",
        comparison.serial.duplicates
    ))
    .ok();
    term.write_line(&format!(
        "    Parallel Found: {}",
        comparison.parallel.duplicates
    ))
    .ok();

    if comparison.duplicates_match {
        term.write_line(&format!("    {} Results match", style("✓").green()))
            .ok();
    } else {
        term.write_line(&format!("    {} Results differ!", style("✗").red()))
            .ok();
    }
}

fn print_json(
    serial: &Option<RunOutcome>,
    parallel: &Option<RunOutcome>,
    comparison: &Option<RunComparison>,
) {
    let run_json = |outcome: &RunOutcome| {
        serde_json::json!({
            "stats": {
                "total": outcome.stats.total,
                "succeeded": outcome.stats.succeeded,
                "failed": outcome.stats.failed,
                "duplicates": outcome.stats.duplicates,
                "workers": outcome.stats.workers,
                "elapsed_ms": outcome.stats.elapsed.as_millis() as u64,
                "throughput": outcome.stats.throughput(),
                "avg_latency_ms": outcome.stats.avg_latency_ms(),
            },
            "groups": outcome.groups,
        })
    };

    let output = serde_json::json!({
        "serial": serial.as_ref().map(run_json),
        "parallel": parallel.as_ref().map(run_json),
        "comparison": comparison.as_ref().map(|c| serde_json::json!({
            "speedup": c.speedup,
            "efficiency": c.efficiency,
            "duplicates_match": c.duplicates_match,
        })),
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
