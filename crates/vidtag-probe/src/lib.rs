//! Metadata probing and content hashing for vidtag.
//!
//! Resolution and duration come from an external prober (ffprobe in
//! production, fakes in tests) behind the [`MetadataProber`] trait; the
//! content checksum is a streaming CRC32 over the whole file. The two
//! concerns combine in [`extract`], which produces everything the codec
//! needs to tag one file.

mod error;
mod extract;
mod hash;
mod prober;
mod verify;

pub use error::ProbeError;
pub use extract::{extract, VideoMetadata};
pub use hash::crc32_file;
pub use prober::{FfprobeProber, MetadataProber};
pub use verify::{verify_file, VerifyOutcome};
