//! Video file discovery for vidtag.
//!
//! Two strategies produce the same answers: a portable recursive walk
//! (always available) and an accelerated `fd`-based enumerator whose raw
//! output is post-filtered through the exact same predicates. When `fd`
//! is missing or fails, discovery falls back to the walk transparently;
//! callers never learn which strategy ran.

mod error;
mod fd;
mod walk;

use std::path::{Path, PathBuf};

use tracing::debug;

use vidtag_core::{is_tagged, is_video_file};

pub use error::ScanError;

/// Find video files that do not yet carry the metadata suffix.
pub fn find_untagged(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    find(root, false)
}

/// Find video files that already carry the metadata suffix.
pub fn find_tagged(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    find(root, true)
}

fn find(root: &Path, want_tagged: bool) -> Result<Vec<PathBuf>, ScanError> {
    if fd::available() {
        match fd::enumerate(root, want_tagged) {
            Ok(raw) => return Ok(apply_predicates(raw, want_tagged)),
            Err(err) => {
                debug!(
                    root = %root.display(),
                    %err,
                    "fd enumeration failed, falling back to directory walk"
                );
            }
        }
    }

    walk::collect(root, want_tagged)
}

/// The single filtering rule both strategies share: recognized container
/// extension, and tagged state matching the request.
fn apply_predicates(paths: Vec<PathBuf>, want_tagged: bool) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| is_video_file(p) && is_tagged(p) == want_tagged)
        .collect()
}
