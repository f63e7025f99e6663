use std::path::{Path, PathBuf};

use vidtag_core::{encode, extract_hash, is_tagged, is_video_file, MetadataTriple};

#[test]
fn test_codec_round_trip_property() {
    // Any valid resolution, non-negative duration, and 8-hex hash must
    // survive an encode -> is_tagged -> extract_hash trip.
    let cases = [
        ("1x1", 0.0, 0x00000000u32),
        ("640x480", 0.4, 0x0000000Fu32),
        ("1920x1080", 95.7, 0xDEADBEEFu32),
        ("3840x2160", 360.0, 0xFFFFFFFFu32),
    ];

    for (resolution, mins, hash) in cases {
        let triple = MetadataTriple::new(resolution, mins, hash);
        let tagged = encode(Path::new("/library/some video.mp4"), &triple);

        assert!(is_tagged(&tagged), "not tagged: {}", tagged.display());
        assert_eq!(
            extract_hash(&tagged),
            Some(format!("{hash:08X}")),
            "hash mismatch for {}",
            tagged.display()
        );
    }
}

#[test]
fn test_codec_tolerates_earlier_bracket_tokens() {
    let path = Path::new("Show[S02E03][HD]_[3840x2160][30min][FEDCBA98].webm");
    assert!(is_tagged(path));
    assert_eq!(extract_hash(path).as_deref(), Some("FEDCBA98"));
}

#[test]
fn test_partial_suffix_is_not_tagged() {
    assert!(!is_tagged(Path::new("video_[1920x1080].mp4")));
    assert_eq!(extract_hash(Path::new("video_[1920x1080].mp4")), None);
}

#[test]
fn test_double_tagging_extracts_newest_hash() {
    // A file tagged twice (old suffix left in the base name) still
    // classifies as tagged and yields the hash of the final suffix.
    let triple = MetadataTriple::new("1280x720", 20.0, 0xAABBCCDD);
    let once = encode(Path::new("clip.mp4"), &triple);
    let twice = encode(&once, &MetadataTriple::new("1280x720", 20.0, 0x11223344));

    assert_eq!(
        twice,
        PathBuf::from("clip_[1280x720][20min][AABBCCDD]_[1280x720][20min][11223344].mp4")
    );
    assert_eq!(extract_hash(&twice).as_deref(), Some("11223344"));
}

#[test]
fn test_extension_set_is_case_insensitive() {
    for name in ["a.mp4", "b.WEBM", "c.Mov", "d.mkv", "e.AVI"] {
        assert!(is_video_file(Path::new(name)), "{name}");
    }
    for name in ["a.txt", "b.jpg", "c.mp3", "noext"] {
        assert!(!is_video_file(Path::new(name)), "{name}");
    }
}
