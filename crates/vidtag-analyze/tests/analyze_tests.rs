use std::fs;

use tempfile::TempDir;
use vidtag_analyze::build_index;

#[test]
fn test_two_sharing_one_apart() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let a = root.join("a_[1920x1080][10min][DEADBEEF].mp4");
    let b = root.join("b_[1920x1080][12min][DEADBEEF].mp4");
    let c = root.join("c_[1920x1080][10min][12345678].mp4");
    for path in [&a, &b, &c] {
        fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
    }

    let index = build_index(root).unwrap();
    assert_eq!(index.len(), 1, "exactly one group expected");

    let group = &index[0];
    assert_eq!(group.hash, "DEADBEEF");

    let mut paths = group.paths.clone();
    paths.sort();
    assert_eq!(paths, vec![a, b]);
}

#[test]
fn test_multiple_independent_groups() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    for name in [
        "a_[1280x720][5min][AAAAAAAA].mp4",
        "b_[1280x720][5min][AAAAAAAA].mp4",
        "c_[1280x720][5min][BBBBBBBB].mkv",
        "d_[1280x720][5min][BBBBBBBB].mkv",
        "e_[1280x720][5min][BBBBBBBB].mkv",
    ] {
        fs::write(root.join(name), name.as_bytes()).unwrap();
    }

    let mut index = build_index(root).unwrap();
    index.sort_by(|a, b| a.hash.cmp(&b.hash));

    assert_eq!(index.len(), 2);
    assert_eq!(index[0].hash, "AAAAAAAA");
    assert_eq!(index[0].paths.len(), 2);
    assert_eq!(index[1].hash, "BBBBBBBB");
    assert_eq!(index[1].paths.len(), 3);
    assert_eq!(index[1].deletable_count(), 2);
}

#[test]
fn test_empty_directory_yields_empty_index() {
    let temp = TempDir::new().unwrap();
    assert!(build_index(temp.path()).unwrap().is_empty());
}
