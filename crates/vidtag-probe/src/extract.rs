//! Combined per-file metadata extraction.

use std::path::Path;

use tracing::debug;

use crate::{crc32_file, MetadataProber, ProbeError};

/// Everything the codec needs to tag one file.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    /// Resolution of the first video stream, `WxH`.
    pub resolution: String,
    /// Container duration in minutes, not rounded.
    pub duration_mins: f64,
    /// CRC32 of the whole file.
    pub crc32: u32,
}

/// Probe resolution and duration, then hash the file contents.
///
/// The three steps run in order and the first failure wins; the
/// returned [`ProbeError`] names the failing step. `progress` receives
/// `(bytes_hashed, total)` during the hashing step.
pub fn extract(
    prober: &dyn MetadataProber,
    path: &Path,
    progress: impl FnMut(u64, u64),
) -> Result<VideoMetadata, ProbeError> {
    let resolution = prober.resolution(path)?;
    let duration_mins = prober.duration_secs(path)? / 60.0;

    let crc32 = crc32_file(path, progress).map_err(|source| ProbeError::Hash {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        %resolution,
        duration_mins,
        crc32 = format_args!("{crc32:08X}"),
        "extracted metadata"
    );

    Ok(VideoMetadata {
        resolution,
        duration_mins,
        crc32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Prober returning canned answers, optionally failing a stage.
    struct FakeProber {
        resolution: Result<String, String>,
        duration: Result<f64, String>,
    }

    impl MetadataProber for FakeProber {
        fn resolution(&self, _path: &Path) -> Result<String, ProbeError> {
            self.resolution
                .clone()
                .map_err(|message| ProbeError::Resolution { message })
        }

        fn duration_secs(&self, _path: &Path) -> Result<f64, ProbeError> {
            self.duration
                .clone()
                .map_err(|message| ProbeError::Duration { message })
        }
    }

    fn ok_prober() -> FakeProber {
        FakeProber {
            resolution: Ok("1920x1080".into()),
            duration: Ok(150.0),
        }
    }

    #[test]
    fn test_extract_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.mp4");
        fs::write(&path, b"123456789").unwrap();

        let meta = extract(&ok_prober(), &path, |_, _| {}).unwrap();
        assert_eq!(meta.resolution, "1920x1080");
        assert!((meta.duration_mins - 2.5).abs() < f64::EPSILON);
        assert_eq!(meta.crc32, 0xCBF43926);
    }

    #[test]
    fn test_extract_resolution_failure_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.mp4");
        fs::write(&path, b"x").unwrap();

        let prober = FakeProber {
            resolution: Err("stream not found".into()),
            duration: Ok(60.0),
        };
        let err = extract(&prober, &path, |_, _| {}).unwrap_err();
        assert_eq!(err.stage(), "resolution");
        assert!(err.to_string().contains("stream not found"));
    }

    #[test]
    fn test_extract_duration_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.mp4");
        fs::write(&path, b"x").unwrap();

        let prober = FakeProber {
            resolution: Ok("640x480".into()),
            duration: Err("no duration".into()),
        };
        let err = extract(&prober, &path, |_, _| {}).unwrap_err();
        assert_eq!(err.stage(), "duration");
    }

    #[test]
    fn test_extract_hash_failure_for_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.mp4");

        let err = extract(&ok_prober(), &path, |_, _| {}).unwrap_err();
        assert_eq!(err.stage(), "hash");
    }
}
