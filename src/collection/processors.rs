//! Leaf processors adapting `ParRange` operations to the executor.

use crate::combiner::{Combiner, VecCombiner};
use crate::progression::Numeric;
use crate::scheduler::{LeafContext, LeafProcessor, SchedulerError};
use crate::splitter::{RangeSplitter, Signalled, Splitter};

pub(super) struct ForEachLeaf<F> {
    pub(super) f: F,
}

impl<T, F> LeafProcessor<RangeSplitter<T>> for ForEachLeaf<F>
where
    T: Numeric,
    F: Fn(T) + Sync,
{
    type Output = ();

    fn process_leaf(
        &self,
        splitter: &mut RangeSplitter<T>,
        _context: &LeafContext,
    ) -> Result<(), SchedulerError> {
        splitter.for_each_remaining(&self.f);
        Ok(())
    }

    fn merge(&self, _left: (), _right: ()) -> Result<(), SchedulerError> {
        Ok(())
    }
}

pub(super) struct ReduceLeaf<F> {
    pub(super) op: F,
}

impl<T, F> LeafProcessor<RangeSplitter<T>> for ReduceLeaf<F>
where
    T: Numeric,
    F: Fn(T, T) -> T + Sync,
{
    type Output = T;

    fn process_leaf(
        &self,
        splitter: &mut RangeSplitter<T>,
        _context: &LeafContext,
    ) -> Result<T, SchedulerError> {
        Ok(splitter.reduce_remaining::<T, _>(&self.op)?)
    }

    fn merge(&self, left: T, right: T) -> Result<T, SchedulerError> {
        Ok((self.op)(left, right))
    }
}

pub(super) struct FoldLeaf<I, F, C> {
    pub(super) identity: I,
    pub(super) fold_op: F,
    pub(super) combine_op: C,
}

impl<T, A, I, F, C> LeafProcessor<RangeSplitter<T>> for FoldLeaf<I, F, C>
where
    T: Numeric,
    A: Send,
    I: Fn() -> A + Sync,
    F: Fn(A, T) -> A + Sync,
    C: Fn(A, A) -> A + Sync,
{
    type Output = A;

    fn process_leaf(
        &self,
        splitter: &mut RangeSplitter<T>,
        _context: &LeafContext,
    ) -> Result<A, SchedulerError> {
        Ok(splitter.by_ref().fold((self.identity)(), &self.fold_op))
    }

    fn merge(&self, left: A, right: A) -> Result<A, SchedulerError> {
        Ok((self.combine_op)(left, right))
    }
}

pub(super) struct MapLeaf<F> {
    pub(super) f: F,
}

impl<T, S, F> LeafProcessor<RangeSplitter<T>> for MapLeaf<F>
where
    T: Numeric,
    S: Send,
    F: Fn(T) -> S + Sync,
{
    type Output = VecCombiner<S>;

    fn process_leaf(
        &self,
        splitter: &mut RangeSplitter<T>,
        _context: &LeafContext,
    ) -> Result<VecCombiner<S>, SchedulerError> {
        Ok(splitter.map_into(&self.f, VecCombiner::new()))
    }

    fn merge(
        &self,
        left: VecCombiner<S>,
        right: VecCombiner<S>,
    ) -> Result<VecCombiner<S>, SchedulerError> {
        Ok(left.combine(right))
    }
}

pub(super) struct CountLeaf<P> {
    pub(super) pred: P,
}

impl<T, P> LeafProcessor<RangeSplitter<T>> for CountLeaf<P>
where
    T: Numeric,
    P: Fn(&T) -> bool + Sync,
{
    type Output = usize;

    fn process_leaf(
        &self,
        splitter: &mut RangeSplitter<T>,
        _context: &LeafContext,
    ) -> Result<usize, SchedulerError> {
        Ok(splitter.by_ref().filter(|elem| (self.pred)(elem)).count())
    }

    fn merge(&self, left: usize, right: usize) -> Result<usize, SchedulerError> {
        Ok(left + right)
    }
}

pub(super) struct FindLeaf<P> {
    pub(super) pred: P,
}

impl<T, P> LeafProcessor<Signalled<RangeSplitter<T>>> for FindLeaf<P>
where
    T: Numeric,
    P: Fn(&T) -> bool + Sync,
{
    type Output = Option<T>;

    fn process_leaf(
        &self,
        splitter: &mut Signalled<RangeSplitter<T>>,
        _context: &LeafContext,
    ) -> Result<Option<T>, SchedulerError> {
        let signal = splitter.signal_handle();
        while !signal.is_aborted() {
            match splitter.next() {
                Some(elem) if (self.pred)(&elem) => {
                    signal.abort();
                    return Ok(Some(elem));
                }
                Some(_) => {}
                None => break,
            }
        }
        Ok(None)
    }

    fn merge(&self, left: Option<T>, right: Option<T>) -> Result<Option<T>, SchedulerError> {
        Ok(left.or(right))
    }
}

pub(super) struct PositionLeaf<P> {
    pub(super) pred: P,
}

impl<T, P> LeafProcessor<Signalled<RangeSplitter<T>>> for PositionLeaf<P>
where
    T: Numeric,
    P: Fn(&T) -> bool + Sync,
{
    type Output = Option<usize>;

    fn process_leaf(
        &self,
        splitter: &mut Signalled<RangeSplitter<T>>,
        context: &LeafContext,
    ) -> Result<Option<usize>, SchedulerError> {
        let signal = splitter.signal_handle();
        for (i, elem) in splitter.by_ref().enumerate() {
            let index = context.offset + i;
            // Flag only ever holds matching indices, so nothing at or past it can win
            if index >= signal.index_flag() {
                break;
            }
            if (self.pred)(&elem) {
                signal.set_index_flag_if_lesser(index);
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn merge(
        &self,
        left: Option<usize>,
        right: Option<usize>,
    ) -> Result<Option<usize>, SchedulerError> {
        Ok(left.or(right))
    }
}
