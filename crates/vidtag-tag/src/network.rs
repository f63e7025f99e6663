//! Network-mount detection for the worker-count policy.

use std::path::Path;

/// Mount-point prefixes that usually mean a network filesystem.
const NETWORK_PREFIXES: &[&str] = &[
    "/mnt/",     // Linux NFS/SMB mounts
    "/media/",   // Linux removable/network media
    "/Volumes/", // macOS network volumes
];

/// Filesystem-type markers that show up in network mount paths.
const NETWORK_MARKERS: &[&str] = &["nfs", "cifs", "smb", "webdav", "ftp", "sftp"];

/// Heuristic check for a path living on a network-mounted location.
///
/// UNC prefixes are checked against the raw path before
/// absolutization, since `//server/share` would otherwise normalize
/// away on some platforms.
pub fn is_network_path(path: &Path) -> bool {
    let raw = path.to_string_lossy();
    if raw.starts_with("//") || raw.starts_with(r"\\") {
        return true;
    }

    let abs = match std::path::absolute(path) {
        Ok(p) => p,
        Err(_) => return false,
    };
    let abs = abs.to_string_lossy();

    if NETWORK_PREFIXES.iter().any(|prefix| abs.starts_with(prefix)) {
        return true;
    }

    let lower = abs.to_lowercase();
    NETWORK_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_unc_paths_are_network() {
        assert!(is_network_path(Path::new("//server/share/video.mp4")));
        assert!(is_network_path(Path::new(r"\\server\share\video.mp4")));
    }

    #[test]
    fn test_mount_prefixes_are_network() {
        assert!(is_network_path(Path::new("/mnt/nas/video.mp4")));
        assert!(is_network_path(Path::new("/media/share/video.mp4")));
        assert!(is_network_path(Path::new("/Volumes/media/video.mp4")));
    }

    #[test]
    fn test_fs_type_markers_are_network() {
        assert!(is_network_path(Path::new("/srv/nfs-share/video.mp4")));
        assert!(is_network_path(Path::new("/data/smb_backup/video.mp4")));
    }

    #[test]
    fn test_local_paths_are_not_network() {
        assert!(!is_network_path(Path::new("/home/user/videos/a.mp4")));
        assert!(!is_network_path(Path::new("/tmp/a.mp4")));
    }
}
