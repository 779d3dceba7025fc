//! # Splittable Parallel Ranges
//!
//! This library implements splittable cursors over arithmetic progressions,
//! the leaf data source of a fork/join parallel-collections framework.
//!
//! ## Core Algorithm
//!
//! 1. **Progressions**: an immutable `start, step, length` triple with O(1) `take`/`drop`
//! 2. **Splitters**: a forward cursor over a progression that can `dup`, `split` in half,
//!    or `psplit` into caller-chosen sizes without touching its own cursor
//! 3. **Fork/join execution**: the executor splits recursively down to a threshold,
//!    folds each leaf sequentially and merges results strictly left-to-right
//! 4. **Coverage ledger**: optional bit-per-index check that the leaf spans
//!    partition the input
//!
//! Result: concatenating the children of any split, in returned order, reproduces the
//! parent's element stream, so reductions are deterministic under parallel timing.
//!
//! ## Usage Example
//!
//! ```ignore
//! use rangesplit::{Executor, ParRange, SchedulerConfig, Sequential};
//!
//! let range = ParRange::new(1i64, 100, 1, true)?;
//! let config = SchedulerConfig::for_len(range.len(), 4)?;
//! let executor = Executor::new(Sequential, config);
//! assert_eq!(range.reduce(&executor, |a, b| a + b)?, 5050);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod progression; // Immutable arithmetic sequences
pub mod splitter;    // Splittable cursors and signalling
pub mod combiner;    // Append-only aggregation sinks
pub mod ledger;      // Split partition tracking
pub mod scheduler;   // Fork/join executor
pub mod collection;  // Owning parallel range collection

// Re-exports for convenience
pub use collection::ParRange;
pub use combiner::{Combiner, VecCombiner};
pub use ledger::{CoverageLedger, LedgerError};
pub use progression::{Numeric, NumericProgression, ProgressionError};
pub use scheduler::{
    ExecutionReport, Executor, LeafContext, LeafProcessor, Parallel, SchedulerConfig,
    SchedulerError, Sequential, Strategy,
};
pub use splitter::{
    AtomicSignalling, IdleSignalling, RangeSplitter, Signalled, Signalling, Splitter,
    SplitterError,
};
