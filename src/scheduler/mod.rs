//! Fork/join executor driving splitters.
//!
//! The executor splits a splitter recursively until a child holds at most
//! `threshold` elements, processes each leaf sequentially, and merges sibling
//! results strictly left-then-right. Merge order therefore matches sequence
//! order no matter which worker finishes first.

mod config;
mod strategy;

pub use config::{default_parallelism, threshold_from_size, SchedulerConfig};
pub use strategy::{Parallel, Sequential, Strategy};

use std::ops::Range;

use thiserror::Error;
use tracing::{debug, debug_span, trace};

use crate::ledger::{CoverageLedger, LedgerError};
use crate::splitter::{Splitter, SplitterError};

/// Errors that can occur while executing a parallel operation.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration invalid (e.g., zero threshold).
    #[error("invalid scheduler configuration: {0}")]
    InvalidConfiguration(String),

    /// A splitter contract was violated by a leaf.
    #[error("splitter error: {0}")]
    Splitter(#[from] SplitterError),

    /// Leaf spans did not partition the input.
    #[error("coverage check failed: {0}")]
    Coverage(#[from] LedgerError),

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// User-supplied processor reported an error.
    #[error("processor error: {0}")]
    Processor(String),
}

impl SchedulerError {
    /// Helper for constructing processor-originated errors.
    pub fn processor_failure(msg: impl Into<String>) -> Self {
        SchedulerError::Processor(msg.into())
    }
}

/// Position of a leaf within the top-level splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafContext {
    /// Index of the leaf's first element in the top-level splitter.
    pub offset: usize,
    /// Number of elements the leaf holds.
    pub len: usize,
    /// Number of splits between the root and this leaf.
    pub depth: usize,
}

impl LeafContext {
    /// Indices covered by the leaf.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Trait implemented by operations run on top of the executor.
pub trait LeafProcessor<S: Splitter>: Sync {
    /// Partial result of a leaf (must be mergeable).
    type Output: Send;

    /// Consume a leaf sequentially.
    fn process_leaf(
        &self,
        splitter: &mut S,
        context: &LeafContext,
    ) -> Result<Self::Output, SchedulerError>;

    /// Merge results of adjacent leaves, `left` preceding `right`.
    fn merge(
        &self,
        left: Self::Output,
        right: Self::Output,
    ) -> Result<Self::Output, SchedulerError>;
}

/// Result returned by the executor.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExecutionReport<O> {
    /// Merged output of all leaves.
    pub output: O,
    /// Number of leaves processed.
    pub leaves: usize,
    /// Deepest split level reached.
    pub max_depth: usize,
}

/// Partial outcome of one subtree.
struct NodeOutcome<O> {
    output: O,
    leaves: usize,
    max_depth: usize,
    spans: Vec<Range<usize>>,
}

/// Fork/join executor over a [`Strategy`].
#[derive(Debug, Clone)]
pub struct Executor<St: Strategy = Sequential> {
    strategy: St,
    config: SchedulerConfig,
}

impl Executor<Sequential> {
    /// Executor running everything on the calling thread.
    pub fn sequential(config: SchedulerConfig) -> Self {
        Self::new(Sequential, config)
    }
}

impl Executor<Parallel> {
    /// Executor backed by a dedicated pool of `num_threads` workers.
    pub fn parallel(num_threads: usize, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Ok(Self::new(Parallel::with_threads(num_threads)?, config))
    }
}

impl<St: Strategy> Executor<St> {
    /// Create a new executor with the provided strategy and configuration.
    pub fn new(strategy: St, config: SchedulerConfig) -> Self {
        Self { strategy, config }
    }

    /// Access configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Access strategy.
    pub fn strategy(&self) -> &St {
        &self.strategy
    }

    /// Split, process and merge `splitter` with `processor`.
    pub fn execute<S, P>(
        &self,
        splitter: S,
        processor: &P,
    ) -> Result<ExecutionReport<P::Output>, SchedulerError>
    where
        S: Splitter,
        P: LeafProcessor<S>,
    {
        let total = splitter.remaining();
        let span = debug_span!("execute", total, threshold = self.config.threshold);
        let _enter = span.enter();

        let root = LeafContext {
            offset: 0,
            len: total,
            depth: 0,
        };
        let outcome = self.evaluate_node(splitter, root, processor)?;

        if self.config.verify_coverage {
            let mut ledger = CoverageLedger::new(total);
            for leaf_span in outcome.spans {
                ledger.mark(leaf_span)?;
            }
            ledger.verify()?;
        }

        debug!(
            leaves = outcome.leaves,
            max_depth = outcome.max_depth,
            "execution complete"
        );

        Ok(ExecutionReport {
            output: outcome.output,
            leaves: outcome.leaves,
            max_depth: outcome.max_depth,
        })
    }

    fn evaluate_node<S, P>(
        &self,
        mut splitter: S,
        context: LeafContext,
        processor: &P,
    ) -> Result<NodeOutcome<P::Output>, SchedulerError>
    where
        S: Splitter,
        P: LeafProcessor<S>,
    {
        if context.len > self.config.threshold {
            // A single child means the splitter cannot be divided further
            if let Ok([left, right]) = <[S; 2]>::try_from(splitter.split()) {
                let left_context = LeafContext {
                    offset: context.offset,
                    len: left.remaining(),
                    depth: context.depth + 1,
                };
                let right_context = LeafContext {
                    offset: context.offset + left_context.len,
                    len: right.remaining(),
                    depth: context.depth + 1,
                };
                trace!(
                    offset = context.offset,
                    left = left_context.len,
                    right = right_context.len,
                    "split"
                );

                let (left_outcome, right_outcome) = self.strategy.join(
                    || self.evaluate_node(left, left_context, processor),
                    || self.evaluate_node(right, right_context, processor),
                );
                let (left_outcome, right_outcome) = (left_outcome?, right_outcome?);

                let output = processor.merge(left_outcome.output, right_outcome.output)?;
                let mut spans = left_outcome.spans;
                spans.extend(right_outcome.spans);
                return Ok(NodeOutcome {
                    output,
                    leaves: left_outcome.leaves + right_outcome.leaves,
                    max_depth: left_outcome.max_depth.max(right_outcome.max_depth),
                    spans,
                });
            }
        }

        trace!(offset = context.offset, len = context.len, depth = context.depth, "leaf");
        let output = processor.process_leaf(&mut splitter, &context)?;
        // Span assigned at split time, not what the processor consumed
        let spans = if self.config.verify_coverage {
            vec![context.span()]
        } else {
            Vec::new()
        };
        Ok(NodeOutcome {
            output,
            leaves: 1,
            max_depth: context.depth,
            spans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::NumericProgression;
    use crate::splitter::RangeSplitter;

    /// Collects each leaf's span so tests can inspect the partition.
    struct SpanCollector;

    impl LeafProcessor<RangeSplitter<i32>> for SpanCollector {
        type Output = Vec<(usize, Vec<i32>)>;

        fn process_leaf(
            &self,
            splitter: &mut RangeSplitter<i32>,
            context: &LeafContext,
        ) -> Result<Self::Output, SchedulerError> {
            Ok(vec![(context.offset, splitter.by_ref().collect())])
        }

        fn merge(
            &self,
            mut left: Self::Output,
            right: Self::Output,
        ) -> Result<Self::Output, SchedulerError> {
            left.extend(right);
            Ok(left)
        }
    }

    #[test]
    fn test_leaves_respect_threshold_and_order() {
        let splitter =
            RangeSplitter::new(NumericProgression::exclusive(0, 10, 1).expect("valid"));
        let config = SchedulerConfig::with_threshold(3)
            .expect("valid")
            .with_coverage_check(true);
        let report = Executor::sequential(config)
            .execute(splitter, &SpanCollector)
            .expect("execution succeeds");

        // 10 -> 5 + 5 -> (2 + 3) + (2 + 3)
        assert_eq!(report.leaves, 4);
        assert_eq!(report.max_depth, 2);
        let offsets: Vec<usize> = report.output.iter().map(|(offset, _)| *offset).collect();
        assert_eq!(offsets, vec![0, 2, 5, 7]);
        let flat: Vec<i32> = report.output.into_iter().flat_map(|(_, xs)| xs).collect();
        assert_eq!(flat, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_processor_error_propagates() {
        struct Failing;

        impl LeafProcessor<RangeSplitter<i32>> for Failing {
            type Output = ();

            fn process_leaf(
                &self,
                _splitter: &mut RangeSplitter<i32>,
                context: &LeafContext,
            ) -> Result<(), SchedulerError> {
                if context.offset > 0 {
                    return Err(SchedulerError::processor_failure("right half failed"));
                }
                Ok(())
            }

            fn merge(&self, _left: (), _right: ()) -> Result<(), SchedulerError> {
                Ok(())
            }
        }

        let splitter =
            RangeSplitter::new(NumericProgression::exclusive(0, 4, 1).expect("valid"));
        let config = SchedulerConfig::with_threshold(2).expect("valid");
        let result = Executor::sequential(config).execute(splitter, &Failing);
        assert!(matches!(result, Err(SchedulerError::Processor(_))));
    }
}
