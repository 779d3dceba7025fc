//! Splittable cursors
//!
//! A splitter is a forward-only cursor that can be divided into independent
//! sub-cursors. Invariant: draining the children of one `split`/`psplit`
//! call in returned order yields exactly the parent's remaining elements.

mod range;
mod signal;

pub use range::RangeSplitter;
pub use signal::{AtomicSignalling, IdleSignalling, Signalled, Signalling, NO_INDEX};

use crate::combiner::Combiner;
use thiserror::Error;

/// Contract violations on a splitter.
///
/// Both indicate a caller bug and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitterError {
    /// `next` requested with no remaining elements.
    #[error("next element requested from an exhausted splitter")]
    Exhausted,

    /// Reduction requested with no remaining elements and no seed.
    #[error("reduce over a splitter with no remaining elements")]
    EmptyReduce,
}

/// Forward cursor that can be split into independent cursors for parallel work.
///
/// `dup`, `split` and `psplit` never move the receiver's cursor; only
/// consumption (`next` and the bulk consumers) does.
pub trait Splitter: Iterator + Sized + Send {
    /// Elements not yet consumed.
    fn remaining(&self) -> usize;

    /// Whether at least one element remains.
    fn has_next(&self) -> bool {
        self.remaining() > 0
    }

    /// Independent splitter over the remaining elements.
    fn dup(&self) -> Self;

    /// Halve the remaining elements.
    ///
    /// Returns one child when fewer than two elements remain, otherwise two
    /// children over the first `n / 2` and the rest.
    fn split(&self) -> Vec<Self>;

    /// Cut the remaining elements into consecutive pieces of the given sizes.
    ///
    /// Requests beyond the remaining count saturate: later pieces come back
    /// short or empty rather than failing.
    fn psplit(&self, sizes: &[usize]) -> Vec<Self>;

    /// Like `next`, but an exhausted splitter is an error instead of `None`.
    fn try_next(&mut self) -> Result<Self::Item, SplitterError> {
        self.next().ok_or(SplitterError::Exhausted)
    }

    /// Apply `f` to every remaining element in order, leaving the splitter exhausted.
    fn for_each_remaining<F>(&mut self, mut f: F)
    where
        F: FnMut(Self::Item),
    {
        for elem in self.by_ref() {
            f(elem);
        }
    }

    /// Left fold seeded by the first remaining element, leaving the splitter exhausted.
    fn reduce_remaining<U, F>(&mut self, mut op: F) -> Result<U, SplitterError>
    where
        Self::Item: Into<U>,
        F: FnMut(U, U) -> U,
    {
        let seed: U = self.next().ok_or(SplitterError::EmptyReduce)?.into();
        Ok(self.by_ref().fold(seed, |acc, elem| op(acc, elem.into())))
    }

    /// Push `f(x)` for every remaining element into `sink`, and hand the sink back.
    fn map_into<S, F, C>(&mut self, mut f: F, mut sink: C) -> C
    where
        F: FnMut(Self::Item) -> S,
        C: Combiner<S>,
    {
        sink.size_hint(self.remaining());
        while let Some(elem) = self.next() {
            sink.push(f(elem));
        }
        sink
    }
}
