//! Discovery error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during discovery.
///
/// Enumerator unavailability is not represented here: it triggers the
/// walk fallback instead of surfacing to callers.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist or is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// I/O failure while walking.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
