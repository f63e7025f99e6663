//! Streaming CRC32 file hashing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crc32fast::Hasher;

/// Read buffer size for hashing.
const HASH_BUF_SIZE: usize = 64 * 1024;

/// Compute the CRC32 (IEEE) checksum of a whole file.
///
/// `progress` is called after every buffer with `(bytes_read, total)`;
/// pass a no-op closure when progress is not needed.
pub fn crc32_file(
    path: &Path,
    mut progress: impl FnMut(u64, u64),
) -> std::io::Result<u32> {
    let mut file = File::open(path)?;
    let total = file.metadata()?.len();

    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; HASH_BUF_SIZE];
    let mut read_so_far: u64 = 0;

    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        read_so_far += n as u64;
        progress(read_so_far, total);
    }

    Ok(hasher.finalize())
}
