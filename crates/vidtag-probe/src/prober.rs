//! The external metadata prober and its ffprobe implementation.

use std::path::Path;
use std::process::Command;

use vidtag_core::is_valid_resolution;

use crate::ProbeError;

/// Source of stream resolution and container duration for a video file.
///
/// Production code uses [`FfprobeProber`]; pipeline tests substitute a
/// fake so no media toolchain is needed.
pub trait MetadataProber: Send + Sync {
    /// Resolution of the first video stream as `WxH`.
    fn resolution(&self, path: &Path) -> Result<String, ProbeError>;

    /// Container duration in seconds.
    fn duration_secs(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Prober that shells out to `ffprobe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    /// Create a new ffprobe-backed prober.
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProber for FfprobeProber {
    fn resolution(&self, path: &Path) -> Result<String, ProbeError> {
        let output = Command::new("ffprobe")
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height"])
            .args(["-of", "csv=s=x:p=0", "--"])
            .arg(path)
            .output()
            .map_err(|e| ProbeError::Resolution {
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Resolution {
                message: combined_output(&output),
            });
        }

        // ffprobe sometimes prints one resolution per stream entry;
        // the first line is the first video stream. A trailing `x`
        // shows up when the height entry is missing.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let resolution = stdout
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches('x')
            .to_string();

        if !is_valid_resolution(&resolution) {
            return Err(ProbeError::Resolution {
                message: format!("invalid resolution format: {resolution}"),
            });
        }

        Ok(resolution)
    }

    fn duration_secs(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new("ffprobe")
            .args(["-v", "error", "-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1", "--"])
            .arg(path)
            .output()
            .map_err(|e| ProbeError::Duration {
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Duration {
                message: combined_output(&output),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<f64>()
            .map_err(|e| ProbeError::Duration {
                message: format!("failed to parse duration {:?}: {e}", stdout.trim()),
            })
    }
}

/// Flatten stdout and stderr into one opaque message for error wrapping.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut message = format!("ffprobe exited with {}", output.status);
    for part in [stdout.trim(), stderr.trim()] {
        if !part.is_empty() {
            message.push_str(": ");
            message.push_str(part);
        }
    }
    message
}
