//! Tagging batch configuration.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a tagging batch.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct BatchOptions {
    /// Explicit worker count. `None` lets the pipeline pick based on
    /// the input paths (1 for network mounts, logical core count
    /// otherwise); an explicit value always wins.
    #[builder(default)]
    #[serde(default)]
    pub workers: Option<usize>,

    /// Minimum interval between per-worker progress events. Progress is
    /// a rate-limited approximation of bytes hashed, not a guarantee.
    #[builder(default = "Duration::from_millis(100)")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: Duration,
}

fn default_progress_interval() -> Duration {
    Duration::from_millis(100)
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: None,
            progress_interval: default_progress_interval(),
        }
    }
}

impl BatchOptions {
    /// Create a new options builder.
    pub fn builder() -> BatchOptionsBuilder {
        BatchOptionsBuilder::default()
    }
}
