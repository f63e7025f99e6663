//! Core types for vidtag.
//!
//! This crate provides the pieces shared by the rest of the vidtag
//! ecosystem: the filename-embedded metadata codec, the video container
//! extension predicate, per-file skip/failure taxonomy, and batch
//! configuration.

mod codec;
mod config;
mod error;

pub use codec::{
    encode, extract_hash, is_tagged, is_valid_resolution, is_video_file, MetadataTriple,
    VIDEO_EXTENSIONS,
};
pub use config::{BatchOptions, BatchOptionsBuilder};
pub use error::SkipReason;
