//! Per-file skip taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Informational reasons a file was skipped during a tagging batch.
///
/// Skips are not failures: a skipped file is simply left alone and the
/// batch continues. `AlreadyTagged` in particular is what makes a
/// half-tagged run safely resumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SkipReason {
    /// Extension is not in the recognized container set.
    #[error("not a video file")]
    NotAVideoFile,

    /// Filename already carries the embedded metadata suffix.
    #[error("already tagged")]
    AlreadyTagged,

    /// Input path is a directory, not a file.
    #[error("is a directory")]
    DirectoryInput,
}
