//! Hash-based duplicate grouping.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use vidtag_core::extract_hash;
use vidtag_scan::{find_tagged, ScanError};

/// A set of tagged files sharing one embedded hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Embedded hash, uppercase hex.
    pub hash: String,
    /// Paths in scan insertion order. Always two or more.
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// How many files could be deleted while keeping one copy.
    pub fn deletable_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }
}

/// Scan `root` for tagged files and group them by embedded hash.
///
/// Groups with fewer than two paths are dropped. Files whose names look
/// tagged but yield no hash are silently excluded; they are malformed,
/// not duplicates, and not errors. Group order carries no cross-run
/// guarantee; path order within a group is scan insertion order.
pub fn build_index(root: &Path) -> Result<Vec<DuplicateGroup>, ScanError> {
    let tagged = find_tagged(root)?;
    debug!(root = %root.display(), tagged = tagged.len(), "building duplicate index");

    let mut by_hash: HashMap<String, Vec<PathBuf>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for path in tagged {
        let Some(hash) = extract_hash(&path) else {
            continue;
        };
        let entry = by_hash.entry(hash.clone()).or_default();
        if entry.is_empty() {
            order.push(hash);
        }
        entry.push(path);
    }

    Ok(order
        .into_iter()
        .filter_map(|hash| {
            let paths = by_hash.remove(&hash)?;
            (paths.len() >= 2).then_some(DuplicateGroup { hash, paths })
        })
        .collect())
}
