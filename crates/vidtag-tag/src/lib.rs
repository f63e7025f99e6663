//! Concurrent tagging pipeline for vidtag.
//!
//! A batch is a fixed pool of worker threads draining a fully-populated,
//! then-closed job queue. Each worker probes, hashes, and renames one
//! file end-to-end before taking the next, and reports through a typed
//! event stream consumed by the presentation layer.

mod events;
mod network;
mod pipeline;
mod tag_file;

pub use events::{BatchSummary, FileOutcome, TagEvent};
pub use network::is_network_path;
pub use pipeline::{effective_workers, start_batch};
pub use tag_file::{tag_file, TagError};
