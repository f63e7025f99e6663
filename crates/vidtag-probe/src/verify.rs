//! Embedded-hash verification for tagged files.

use std::path::Path;

use vidtag_core::{extract_hash, is_video_file};

use crate::{crc32_file, ProbeError};

/// Result of checking one file against its embedded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Recomputed checksum matches the embedded hash.
    Verified,
    /// File contents no longer match the filename. Corruption, or the
    /// file changed after tagging.
    Mismatch { expected: String, actual: u32 },
    /// Extension is not in the recognized container set.
    NotAVideoFile,
    /// No embedded hash to compare against.
    Untagged,
}

/// Recompute a file's CRC32 and compare it with the hash embedded in
/// its filename.
///
/// Comparison is case-insensitive; `progress` receives
/// `(bytes_read, total)` during hashing.
pub fn verify_file(
    path: &Path,
    progress: impl FnMut(u64, u64),
) -> Result<VerifyOutcome, ProbeError> {
    if !is_video_file(path) {
        return Ok(VerifyOutcome::NotAVideoFile);
    }

    // Already uppercase-normalized by the codec.
    let Some(expected) = extract_hash(path) else {
        return Ok(VerifyOutcome::Untagged);
    };

    let actual = crc32_file(path, progress).map_err(|source| ProbeError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    if expected == format!("{actual:08X}") {
        Ok(VerifyOutcome::Verified)
    } else {
        Ok(VerifyOutcome::Mismatch { expected, actual })
    }
}
