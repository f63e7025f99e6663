//! Extraction error types.

use std::path::PathBuf;

use thiserror::Error;

/// A single extraction step failed for one file.
///
/// Each variant names the step so callers can report precisely what went
/// wrong; the collaborator's message is carried verbatim, never parsed.
/// There are no retries here: a transient failure leaves the file
/// untagged for the next run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Could not determine the stream resolution.
    #[error("failed to get resolution: {message}")]
    Resolution { message: String },

    /// Could not determine the container duration.
    #[error("failed to get duration: {message}")]
    Duration { message: String },

    /// Could not compute the content checksum.
    #[error("failed to hash {}: {source}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    /// Short stage name for log fields and summaries.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Resolution { .. } => "resolution",
            Self::Duration { .. } => "duration",
            Self::Hash { .. } => "hash",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let err = ProbeError::Resolution {
            message: "no such file".into(),
        };
        assert_eq!(err.stage(), "resolution");
        assert!(err.to_string().contains("no such file"));
    }
}
