//! Filename-embedded metadata codec.
//!
//! Tagged video files carry a `_[WxH][Dmin][HHHHHHHH]` suffix immediately
//! before the extension: resolution, duration in whole minutes, and the
//! CRC32 of the file contents as 8 hex digits. The suffix is the only
//! durable wire format of the system; everything else is rebuilt per run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Recognized video container extensions, lowercase without the dot.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "webm", "mov", "flv", "mkv", "avi", "wmv", "mpg",
];

/// Anchored tagging grammar: the bracket triple must be the literal
/// filename tail before the extension.
static TAGGED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_\[(\d+x\d+)\]\[(\d+)min\]\[([0-9a-fA-F]{8})\]\.[^.]*$")
        .expect("invalid tagged-filename regex")
});

/// Any 8-hex-digit bracket group, anywhere in a name.
static HASH_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9a-fA-F]{8})\]").expect("invalid hash-bracket regex"));

static RESOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+x\d+$").expect("invalid resolution regex"));

/// The resolution/duration/hash triple embedded into a tagged filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataTriple {
    /// Video resolution as `WxH`, e.g. `1920x1080`.
    pub resolution: String,
    /// Container duration in minutes. Rounded to a whole minute at
    /// encode time, kept fractional here.
    pub duration_mins: f64,
    /// CRC32 checksum of the whole file.
    pub hash: u32,
}

impl MetadataTriple {
    /// Create a new triple.
    pub fn new(resolution: impl Into<String>, duration_mins: f64, hash: u32) -> Self {
        Self {
            resolution: resolution.into(),
            duration_mins,
            hash,
        }
    }

    /// The hash rendered the way it appears in a filename.
    pub fn hash_hex(&self) -> String {
        format!("{:08X}", self.hash)
    }
}

/// Check that a string is a well-formed `WxH` resolution.
pub fn is_valid_resolution(s: &str) -> bool {
    RESOLUTION_RE.is_match(s)
}

/// Check whether a path has a recognized video container extension.
///
/// Case-insensitive; paths without an extension are not video files.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Check whether a filename already carries the embedded metadata suffix.
pub fn is_tagged(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    TAGGED_RE.is_match(&name)
}

/// Build the tagged path for `path` with `triple` embedded.
///
/// Pure string surgery, no filesystem access: strips the extension,
/// appends the bracket triple, reattaches the extension. Duration is
/// rounded to the nearest minute and the hash rendered as 8 uppercase
/// hex digits.
pub fn encode(path: &Path, triple: &MetadataTriple) -> PathBuf {
    let full = path.to_string_lossy();
    let ext = path.extension().and_then(OsStr::to_str).unwrap_or("");

    let (base, dot_ext) = if ext.is_empty() {
        (full.as_ref(), String::new())
    } else {
        (&full[..full.len() - ext.len() - 1], format!(".{ext}"))
    };

    PathBuf::from(format!(
        "{base}_[{}][{:.0}min][{:08X}]{dot_ext}",
        triple.resolution, triple.duration_mins, triple.hash
    ))
}

/// Extract the embedded hash from a tagged filename, normalized to
/// uppercase.
///
/// Returns `None` for untagged names. For tagged names the **last**
/// 8-hex-digit bracket group in the filename wins, so cosmetic bracketed
/// tokens inserted earlier in the name (`[S02E03]`, `[2019]`) are
/// tolerated as long as the anchored suffix grammar still matches.
pub fn extract_hash(path: &Path) -> Option<String> {
    let name = path.file_name().map(|n| n.to_string_lossy())?;
    if !TAGGED_RE.is_match(&name) {
        return None;
    }

    HASH_BRACKET_RE
        .captures_iter(&name)
        .last()
        .map(|caps| caps[1].to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_round_trips() {
        let triple = MetadataTriple::new("1920x1080", 42.4, 0xDEADBEEF);
        let tagged = encode(Path::new("/videos/movie.mp4"), &triple);

        assert_eq!(
            tagged,
            PathBuf::from("/videos/movie_[1920x1080][42min][DEADBEEF].mp4")
        );
        assert!(is_tagged(&tagged));
        assert_eq!(extract_hash(&tagged).as_deref(), Some("DEADBEEF"));
    }

    #[test]
    fn test_encode_no_extension() {
        let triple = MetadataTriple::new("640x480", 5.0, 0x1234ABCD);
        let tagged = encode(Path::new("clip"), &triple);
        assert_eq!(tagged, PathBuf::from("clip_[640x480][5min][1234ABCD]"));
    }

    #[test]
    fn test_is_tagged_requires_full_suffix() {
        assert!(!is_tagged(Path::new("video_[1920x1080].mp4")));
        assert!(!is_tagged(Path::new("video_[1920x1080][30min].mp4")));
        assert!(!is_tagged(Path::new("video.mp4")));
        assert!(is_tagged(Path::new("video_[1920x1080][30min][abcdef01].mp4")));
    }

    #[test]
    fn test_extract_hash_last_bracket_wins() {
        let path = Path::new("Show[S02E03][HD]_[3840x2160][30min][FEDCBA98].webm");
        assert_eq!(extract_hash(path).as_deref(), Some("FEDCBA98"));
    }

    #[test]
    fn test_extract_hash_case_insensitive() {
        let lower = Path::new("a_[1280x720][12min][deadbeef].mkv");
        let upper = Path::new("b_[1280x720][12min][DEADBEEF].mkv");
        assert_eq!(extract_hash(lower), extract_hash(upper));
    }

    #[test]
    fn test_extract_hash_untagged() {
        assert_eq!(extract_hash(Path::new("video_[deadbeef].mp4")), None);
        assert_eq!(extract_hash(Path::new("video.mp4")), None);
    }

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("movie.mp4")));
        assert!(is_video_file(Path::new("movie.MKV")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("no_extension")));
    }

    #[test]
    fn test_is_valid_resolution() {
        assert!(is_valid_resolution("1920x1080"));
        assert!(!is_valid_resolution("1920x"));
        assert!(!is_valid_resolution("1920x1080x"));
        assert!(!is_valid_resolution("HD"));
    }

    #[test]
    fn test_duration_rounds_at_encode() {
        let triple = MetadataTriple::new("1280x720", 29.6, 0x01020304);
        let tagged = encode(Path::new("x.mp4"), &triple);
        assert_eq!(tagged, PathBuf::from("x_[1280x720][30min][01020304].mp4"));
    }
}
