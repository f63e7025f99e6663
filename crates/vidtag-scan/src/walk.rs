//! Portable recursive walk strategy.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use vidtag_core::{is_tagged, is_video_file};

use crate::ScanError;

/// Walk `root` and collect video files matching the requested tagged
/// state, in traversal order.
pub(crate) fn collect(root: &Path, want_tagged: bool) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).skip_hidden(false).sort(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
            ScanError::io(path, std::io::Error::other(err.to_string()))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_video_file(&path) && is_tagged(&path) == want_tagged {
            files.push(path);
        }
    }

    Ok(files)
}
