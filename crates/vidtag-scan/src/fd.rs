//! Accelerated enumeration via the external `fd` binary.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Regex alternation of the recognized container extensions, for fd's
/// pattern argument.
fn extension_pattern() -> String {
    let joined = vidtag_core::VIDEO_EXTENSIONS.join(r"$|\.");
    format!(r"\.{joined}$")
}

/// Pattern matching the tagged-filename suffix grammar. Broader than the
/// codec's anchored regex on purpose: results are re-filtered anyway.
const TAGGED_PATTERN: &str = r"_\[.*\]\[.*min\]\[[a-fA-F0-9]{8}\]\.";

/// Whether the `fd` binary is on PATH.
pub(crate) fn available() -> bool {
    which::which("fd").is_ok()
}

/// Run `fd` under `root` and parse its newline-delimited output.
///
/// `--hidden` and `--no-ignore` disable fd's default filtering so this
/// strategy sees exactly the files the portable walk sees; without them
/// dotfiles and gitignored paths would silently vanish from one strategy
/// only. A non-zero exit status or spawn failure is an error; the caller
/// falls back to the portable walk.
pub(crate) fn enumerate(root: &Path, want_tagged: bool) -> io::Result<Vec<PathBuf>> {
    let mut cmd = Command::new("fd");
    cmd.args(["--type", "f", "--hidden", "--no-ignore"]);

    if want_tagged {
        cmd.arg(TAGGED_PATTERN);
    } else {
        cmd.arg("--ignore-case").arg(extension_pattern());
    }
    cmd.arg(root);

    let output = cmd.output()?;
    if !output.status.success() {
        return Err(io::Error::other(format!(
            "fd exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_pattern_covers_all_containers() {
        let pattern = extension_pattern();
        for ext in vidtag_core::VIDEO_EXTENSIONS {
            assert!(pattern.contains(ext), "{ext} missing from {pattern}");
        }
        assert!(pattern.starts_with(r"\."));
        assert!(pattern.ends_with('$'));
    }
}
