//! Duplicate index building for vidtag.
//!
//! Tagged files already carry their content hash in the filename, so
//! duplicate detection is a matter of re-scanning tagged files and
//! grouping paths by embedded hash. No file contents are read here.

mod index;

pub use index::{build_index, DuplicateGroup};
