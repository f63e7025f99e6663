//! vidtag - tag video files with embedded metadata, then hunt duplicates.
//!
//! Usage:
//!   vidtag tag <PATH>...               Tag videos (directories are scanned)
//!   vidtag verify <FILE>...            Check files against their embedded hash
//!   vidtag duplicates [PATH]           Resolve duplicates in the TUI
//!   vidtag duplicates -f json [PATH]   Print the duplicate index as JSON
//!   vidtag --help                      Show help

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use vidtag_core::{BatchOptions, SkipReason};
use vidtag_probe::{verify_file, FfprobeProber, VerifyOutcome};
use vidtag_scan::find_untagged;
use vidtag_tag::{start_batch, FileOutcome, TagEvent};

#[derive(Parser)]
#[command(
    name = "vidtag",
    version,
    about = "Tag video files with embedded metadata and resolve duplicates",
    long_about = "vidtag renames video files to carry their resolution, duration, \
                  and a CRC-32 of their content in the filename.\n\n\
                  Tagged files can then be grouped by hash and duplicate copies \
                  deleted interactively with `vidtag duplicates`."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag video files with resolution, duration, and content hash
    Tag {
        /// Files to tag; directories are scanned for untagged videos
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Worker thread count (default: one per core, 1 on network mounts)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Check tagged files against their embedded content hash
    Verify {
        /// Tagged video files to verify
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Group tagged files by embedded hash and resolve duplicates
    Duplicates {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Print the index instead of launching the TUI
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tag { paths, workers } => run_tag(paths, workers),
        Command::Verify { files } => run_verify(files),
        Command::Duplicates { path, format } => run_duplicates(&path, format),
    }
}

/// Expand directory arguments and run a tagging batch.
fn run_tag(paths: Vec<PathBuf>, workers: Option<usize>) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        if path.is_dir() {
            let found = find_untagged(&path)
                .with_context(|| format!("scanning {}", path.display()))?;
            files.extend(found);
        } else {
            files.push(path);
        }
    }

    if files.is_empty() {
        println!("No untagged videos found.");
        return Ok(());
    }

    let options = BatchOptions::builder()
        .workers(workers)
        .build()
        .context("invalid batch options")?;

    let events = start_batch(Arc::new(FfprobeProber::new()), files, options);

    let mut summary = None;
    for event in events {
        match event {
            TagEvent::WorkerCompleted { path, outcome, .. } => match outcome {
                FileOutcome::Tagged { new_path } => {
                    println!("{} -> {}", path.display(), new_path.display());
                }
                // Re-running over a tagged tree is routine; stay quiet.
                FileOutcome::Skipped(SkipReason::AlreadyTagged) => {}
                FileOutcome::Skipped(reason) => {
                    println!("skipped {}: {}", path.display(), reason);
                }
                FileOutcome::Failed(error) => {
                    eprintln!("failed {}: {}", path.display(), error);
                }
            },
            TagEvent::BatchComplete(s) => summary = Some(s),
            TagEvent::WorkerStarted { .. }
            | TagEvent::WorkerProgress { .. }
            | TagEvent::OverallProgress { .. } => {}
        }
    }

    if let Some(summary) = summary {
        println!();
        println!(
            "{} tagged, {} skipped, {} failed",
            summary.tagged, summary.skipped, summary.failed
        );
        if summary.failed > 0 {
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Recompute each file's checksum and compare it with the embedded hash.
fn run_verify(files: Vec<PathBuf>) -> Result<()> {
    println!("Verifying {} files...", files.len());

    let mut verified = 0;
    let mut failed = 0;
    for path in files {
        match verify_file(&path, |_, _| {}) {
            Ok(VerifyOutcome::Verified) => {
                println!("ok {}", path.display());
                verified += 1;
            }
            Ok(VerifyOutcome::Mismatch { expected, actual }) => {
                println!(
                    "MISMATCH {} (expected {expected}, got {actual:08X})",
                    path.display()
                );
                failed += 1;
            }
            Ok(VerifyOutcome::NotAVideoFile) => {
                println!("skipped {}: not a video file", path.display());
            }
            Ok(VerifyOutcome::Untagged) => {
                println!("skipped {}: no embedded hash", path.display());
            }
            Err(err) => {
                eprintln!("failed {}: {}", path.display(), err);
                failed += 1;
            }
        }
    }

    println!();
    println!("{verified} verified, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the duplicate index and either print it or hand it to the TUI.
fn run_duplicates(path: &PathBuf, format: Option<OutputFormat>) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    let index = vidtag_analyze::build_index(&path)
        .with_context(|| format!("scanning {}", path.display()))?;

    match format {
        None => {
            vidtag_tui::run(index)?;
        }
        Some(OutputFormat::Text) => {
            if index.is_empty() {
                println!("No duplicates found.");
                return Ok(());
            }
            for group in &index {
                println!(
                    "{} ({} files, {} deletable)",
                    group.hash,
                    group.paths.len(),
                    group.deletable_count()
                );
                for path in &group.paths {
                    println!("  {}", path.display());
                }
            }
        }
        Some(OutputFormat::Json) => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &index)
                .context("serializing index")?;
            println!();
        }
    }

    Ok(())
}
