//! Typed event stream emitted by a tagging batch.

use std::path::PathBuf;

use vidtag_core::SkipReason;

use crate::TagError;

/// How one file fared.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was tagged and renamed.
    Tagged { new_path: PathBuf },
    /// The file was left alone.
    Skipped(SkipReason),
    /// Extraction or rename failed; the file stays untagged and will be
    /// retried on the next run.
    Failed(TagError),
}

/// Aggregate counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub tagged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// Total files the batch looked at.
    pub fn total(&self) -> usize {
        self.tagged + self.skipped + self.failed
    }
}

/// Events emitted by the pipeline, keyed by worker id and path.
#[derive(Debug)]
pub enum TagEvent {
    /// A worker picked up a file.
    WorkerStarted { worker: usize, path: PathBuf },
    /// Rate-limited approximation of hashing progress, 0.0..=1.0.
    WorkerProgress {
        worker: usize,
        path: PathBuf,
        ratio: f64,
    },
    /// A worker finished a file, for better or worse.
    WorkerCompleted {
        worker: usize,
        path: PathBuf,
        outcome: FileOutcome,
    },
    /// Batch-wide completion counter.
    OverallProgress { completed: usize, total: usize },
    /// Terminal event: every worker has exited.
    BatchComplete(BatchSummary),
}
