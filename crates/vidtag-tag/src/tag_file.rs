//! Per-file tagging logic, shared by the pool and the serial path.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use vidtag_core::{encode, is_tagged, is_video_file, MetadataTriple, SkipReason};
use vidtag_probe::{extract, MetadataProber, ProbeError};

use crate::FileOutcome;

/// A per-file tagging failure. The batch always continues past these.
#[derive(Debug, Error)]
pub enum TagError {
    /// Could not stat the input path.
    #[error("cannot access {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata extraction or hashing failed.
    #[error(transparent)]
    Extract(#[from] ProbeError),

    /// The atomic rename at the end failed; the file stays untagged.
    #[error("failed to rename {}: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Tag a single file: probe, hash, rename.
///
/// Never panics and never aborts the caller's batch; every exit is a
/// [`FileOutcome`]. `progress` receives the hashing ratio in 0.0..=1.0.
pub fn tag_file(
    prober: &dyn MetadataProber,
    path: &Path,
    mut progress: impl FnMut(f64),
) -> FileOutcome {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(source) => {
            return FileOutcome::Failed(TagError::Stat {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if metadata.is_dir() {
        return FileOutcome::Skipped(SkipReason::DirectoryInput);
    }
    if !is_video_file(path) {
        return FileOutcome::Skipped(SkipReason::NotAVideoFile);
    }
    if is_tagged(path) {
        return FileOutcome::Skipped(SkipReason::AlreadyTagged);
    }

    let extracted = match extract(prober, path, |read, total| {
        if total > 0 {
            progress(read as f64 / total as f64);
        }
    }) {
        Ok(m) => m,
        Err(err) => {
            warn!(path = %path.display(), stage = err.stage(), %err, "extraction failed");
            return FileOutcome::Failed(err.into());
        }
    };

    let triple = MetadataTriple::new(
        extracted.resolution,
        extracted.duration_mins,
        extracted.crc32,
    );
    let new_path = encode(path, &triple);

    match fs::rename(path, &new_path) {
        Ok(()) => FileOutcome::Tagged { new_path },
        Err(source) => {
            warn!(path = %path.display(), %source, "rename failed");
            FileOutcome::Failed(TagError::Rename {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
