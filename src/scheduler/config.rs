//! Executor configuration
//!
//! The split threshold bounds leaf size: a splitter with more than
//! `threshold` remaining elements is split again, anything smaller is
//! processed sequentially.

use std::num::NonZeroUsize;

use super::SchedulerError;

/// Leaf size giving roughly 8 leaves per worker: `1 + len / (8·p)`.
///
/// With a single worker there is nothing to balance, so the whole range is one leaf.
pub fn threshold_from_size(len: usize, parallelism: usize) -> usize {
    if parallelism > 1 {
        1 + len / parallelism.saturating_mul(8)
    } else {
        len.max(1)
    }
}

/// Number of hardware threads, falling back to 1 when unknown.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Configuration parameters for fork/join execution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SchedulerConfig {
    /// Maximum number of elements processed by one leaf.
    pub threshold: usize,
    /// Number of workers the threshold was tuned for.
    pub parallelism: usize,
    /// Record leaf spans and check that the splits partitioned the input.
    pub verify_coverage: bool,
}

impl SchedulerConfig {
    /// Construct configuration for `len` elements and `parallelism` workers.
    pub fn for_len(len: usize, parallelism: usize) -> Result<Self, SchedulerError> {
        if parallelism == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "parallelism must be > 0".to_string(),
            ));
        }
        Ok(Self {
            threshold: threshold_from_size(len, parallelism),
            parallelism,
            verify_coverage: false,
        })
    }

    /// Construct configuration with explicit threshold.
    pub fn with_threshold(threshold: usize) -> Result<Self, SchedulerError> {
        if threshold == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "threshold must be > 0".to_string(),
            ));
        }
        Ok(Self {
            threshold,
            parallelism: 1,
            verify_coverage: false,
        })
    }

    /// Record the worker count (the threshold is left as is).
    pub fn with_parallelism(mut self, parallelism: usize) -> Result<Self, SchedulerError> {
        if parallelism == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "parallelism must be > 0".to_string(),
            ));
        }
        self.parallelism = parallelism;
        Ok(self)
    }

    /// Enable coverage verification.
    pub fn with_coverage_check(mut self, enabled: bool) -> Self {
        self.verify_coverage = enabled;
        self
    }

    /// Upper bound on split depth for `len` elements: `⌈log2(len / threshold)⌉`.
    pub fn depth_bound(&self, len: usize) -> usize {
        let leaves = len.div_ceil(self.threshold);
        if leaves <= 1 {
            return 0;
        }
        (leaves as f64).log2().ceil() as usize
    }
}
