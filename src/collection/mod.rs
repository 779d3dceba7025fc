//! Parallel range collection
//!
//! `ParRange` owns a progression, hands out the top-level splitter, and runs
//! bulk operations by adapting them to the executor's leaf-processing
//! interface.

mod processors;

use std::sync::Arc;

use tracing::instrument;

use crate::combiner::Combiner;
use crate::progression::{Numeric, NumericProgression, ProgressionError};
use crate::scheduler::{ExecutionReport, Executor, SchedulerError, Strategy};
use crate::splitter::{AtomicSignalling, RangeSplitter, Signalled, Signalling};

use processors::{
    CountLeaf, FindLeaf, FoldLeaf, ForEachLeaf, MapLeaf, PositionLeaf, ReduceLeaf,
};

/// Parallel collection over an arithmetic progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParRange<T: Numeric> {
    range: NumericProgression<T>,
}

impl<T: Numeric> ParRange<T> {
    /// Create collection from bounds: `start` up to `end` by `step`.
    pub fn new(start: T, end: T, step: T, inclusive: bool) -> Result<Self, ProgressionError> {
        NumericProgression::new(start, end, step, inclusive).map(Self::from_progression)
    }

    /// Wrap an existing progression
    pub fn from_progression(range: NumericProgression<T>) -> Self {
        Self { range }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Element at index `i`
    pub fn get(&self, i: usize) -> Option<T> {
        self.range.get(i)
    }

    /// Sequential view of the collection
    pub fn progression(&self) -> NumericProgression<T> {
        self.range
    }

    /// Top-level splitter over the whole collection
    pub fn splitter(&self) -> RangeSplitter<T> {
        RangeSplitter::new(self.range)
    }

    /// Apply `f` to every element.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn for_each<St, F>(&self, executor: &Executor<St>, f: F) -> Result<(), SchedulerError>
    where
        St: Strategy,
        F: Fn(T) + Sync,
    {
        executor
            .execute(self.splitter(), &ForEachLeaf { f })
            .map(|report| report.output)
    }

    /// Combine all elements with `op`, which must be associative.
    ///
    /// An empty collection fails with [`SplitterError::EmptyReduce`](crate::SplitterError::EmptyReduce).
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn reduce<St, F>(&self, executor: &Executor<St>, op: F) -> Result<T, SchedulerError>
    where
        St: Strategy,
        F: Fn(T, T) -> T + Sync,
    {
        executor
            .execute(self.splitter(), &ReduceLeaf { op })
            .map(|report| report.output)
    }

    /// Fold each leaf from `identity()` with `fold_op`, then join leaves with `combine_op`.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn fold<St, A, I, F, C>(
        &self,
        executor: &Executor<St>,
        identity: I,
        fold_op: F,
        combine_op: C,
    ) -> Result<A, SchedulerError>
    where
        St: Strategy,
        A: Send,
        I: Fn() -> A + Sync,
        F: Fn(A, T) -> A + Sync,
        C: Fn(A, A) -> A + Sync,
    {
        self.fold_report(executor, identity, fold_op, combine_op)
            .map(|report| report.output)
    }

    /// Same as [`fold`](Self::fold), also reporting leaf count and split depth.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn fold_report<St, A, I, F, C>(
        &self,
        executor: &Executor<St>,
        identity: I,
        fold_op: F,
        combine_op: C,
    ) -> Result<ExecutionReport<A>, SchedulerError>
    where
        St: Strategy,
        A: Send,
        I: Fn() -> A + Sync,
        F: Fn(A, T) -> A + Sync,
        C: Fn(A, A) -> A + Sync,
    {
        let processor = FoldLeaf {
            identity,
            fold_op,
            combine_op,
        };
        executor.execute(self.splitter(), &processor)
    }

    /// Map every element, preserving order.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn map<St, S, F>(&self, executor: &Executor<St>, f: F) -> Result<Vec<S>, SchedulerError>
    where
        St: Strategy,
        S: Send,
        F: Fn(T) -> S + Sync,
    {
        executor
            .execute(self.splitter(), &MapLeaf { f })
            .map(|report| report.output.result())
    }

    /// Number of elements satisfying `pred`.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn count<St, P>(&self, executor: &Executor<St>, pred: P) -> Result<usize, SchedulerError>
    where
        St: Strategy,
        P: Fn(&T) -> bool + Sync,
    {
        executor
            .execute(self.splitter(), &CountLeaf { pred })
            .map(|report| report.output)
    }

    /// Some element satisfying `pred`, not necessarily the first.
    ///
    /// The first match aborts the remaining leaves.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn find_any<St, P>(
        &self,
        executor: &Executor<St>,
        pred: P,
    ) -> Result<Option<T>, SchedulerError>
    where
        St: Strategy,
        P: Fn(&T) -> bool + Sync,
    {
        let signal: Arc<dyn Signalling> = Arc::new(AtomicSignalling::new());
        let splitter = Signalled::new(self.splitter(), signal);
        executor
            .execute(splitter, &FindLeaf { pred })
            .map(|report| report.output)
    }

    /// Index of the first element satisfying `pred`.
    ///
    /// Leaves lying wholly after an already-found index are skipped.
    #[instrument(level = "debug", skip_all, fields(len = self.len()))]
    pub fn position<St, P>(
        &self,
        executor: &Executor<St>,
        pred: P,
    ) -> Result<Option<usize>, SchedulerError>
    where
        St: Strategy,
        P: Fn(&T) -> bool + Sync,
    {
        let signal: Arc<dyn Signalling> = Arc::new(AtomicSignalling::new());
        let splitter = Signalled::new(self.splitter(), signal);
        executor
            .execute(splitter, &PositionLeaf { pred })
            .map(|report| report.output)
    }
}

impl<T: Numeric> From<NumericProgression<T>> for ParRange<T> {
    fn from(range: NumericProgression<T>) -> Self {
        Self::from_progression(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerConfig;
    use crate::splitter::SplitterError;

    fn executor(threshold: usize) -> Executor {
        Executor::sequential(SchedulerConfig::with_threshold(threshold).expect("valid"))
    }

    #[test]
    fn test_reduce_matches_sequential_sum() {
        let range = ParRange::new(1i64, 100, 1, true).expect("valid");
        assert_eq!(range.reduce(&executor(7), |a, b| a + b).expect("non-empty"), 5050);
    }

    #[test]
    fn test_reduce_empty_fails() {
        let range = ParRange::new(0i32, 0, 1, false).expect("valid");
        let result = range.reduce(&executor(4), |a, b| a + b);
        assert!(matches!(
            result,
            Err(SchedulerError::Splitter(SplitterError::EmptyReduce))
        ));
    }

    #[test]
    fn test_map_preserves_order() {
        let range = ParRange::new(0u16, 20, 3, false).expect("valid");
        let squares = range.map(&executor(2), |x| u32::from(x) * u32::from(x)).expect("maps");
        assert_eq!(squares, vec![0, 9, 36, 81, 144, 225, 324]);
    }

    #[test]
    fn test_fold_and_count() {
        let range = ParRange::new(0i32, 50, 1, false).expect("valid");
        let evens = range.count(&executor(6), |x| x % 2 == 0).expect("counts");
        assert_eq!(evens, 25);

        let max = range
            .fold(&executor(6), || i32::MIN, |acc, x| acc.max(x), |a, b| a.max(b))
            .expect("folds");
        assert_eq!(max, 49);
    }

    #[test]
    fn test_position_is_minimal() {
        let range = ParRange::new(0i64, 1000, 1, false).expect("valid");
        let found = range.position(&executor(16), |x| x % 97 == 96).expect("runs");
        assert_eq!(found, Some(96));
        assert_eq!(range.position(&executor(16), |x| *x < 0).expect("runs"), None);
    }

    #[test]
    fn test_find_any_returns_a_match() {
        let range = ParRange::new(0i64, 1000, 1, false).expect("valid");
        let found = range.find_any(&executor(16), |x| x % 250 == 249).expect("runs");
        assert!(matches!(found, Some(x) if x % 250 == 249));
    }
}
