//! Cross-cutting signalling for splitters
//!
//! Abort and index-flag signals are attached by composition: any splitter
//! can be wrapped in [`Signalled`], and every child it produces carries the
//! same signalling context. Cursors stay private to each splitter; the
//! context is the only state siblings share.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Splitter, SplitterError};
use crate::combiner::Combiner;

/// Index flag value meaning "no index recorded".
pub const NO_INDEX: usize = usize::MAX;

/// Signals shared between the splitters of one parallel operation.
pub trait Signalling: Send + Sync + fmt::Debug {
    /// Whether some worker asked everyone to stop.
    fn is_aborted(&self) -> bool;

    /// Ask all workers sharing this context to stop.
    fn abort(&self);

    /// Current index flag ([`NO_INDEX`] when unset).
    fn index_flag(&self) -> usize;

    /// Overwrite the index flag.
    fn set_index_flag(&self, flag: usize);

    /// Raise the index flag to `flag` if it is currently lower.
    fn set_index_flag_if_greater(&self, flag: usize);

    /// Lower the index flag to `flag` if it is currently higher.
    fn set_index_flag_if_lesser(&self, flag: usize);

    /// Identifier of the operation this context belongs to.
    fn tag(&self) -> usize;
}

/// Signalling that never fires and ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleSignalling;

impl Signalling for IdleSignalling {
    fn is_aborted(&self) -> bool {
        false
    }

    fn abort(&self) {}

    fn index_flag(&self) -> usize {
        NO_INDEX
    }

    fn set_index_flag(&self, _flag: usize) {}

    fn set_index_flag_if_greater(&self, _flag: usize) {}

    fn set_index_flag_if_lesser(&self, _flag: usize) {}

    fn tag(&self) -> usize {
        0
    }
}

/// Lock-free signalling context backed by atomics.
#[derive(Debug)]
pub struct AtomicSignalling {
    aborted: AtomicBool,
    index_flag: AtomicUsize,
    tag: usize,
}

impl AtomicSignalling {
    /// Create context with no abort and no index recorded
    pub fn new() -> Self {
        Self::with_tag(0)
    }

    /// Create context carrying an operation identifier
    pub fn with_tag(tag: usize) -> Self {
        Self {
            aborted: AtomicBool::new(false),
            index_flag: AtomicUsize::new(NO_INDEX),
            tag,
        }
    }
}

impl Signalling for AtomicSignalling {
    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    fn index_flag(&self) -> usize {
        self.index_flag.load(Ordering::Acquire)
    }

    fn set_index_flag(&self, flag: usize) {
        self.index_flag.store(flag, Ordering::Release);
    }

    fn set_index_flag_if_greater(&self, flag: usize) {
        // An unset flag counts as lowest for this comparison
        let _ = self
            .index_flag
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current == NO_INDEX || current < flag).then_some(flag)
            });
    }

    fn set_index_flag_if_lesser(&self, flag: usize) {
        self.index_flag.fetch_min(flag, Ordering::AcqRel);
    }

    fn tag(&self) -> usize {
        self.tag
    }
}

/// Splitter decorated with a shared signalling context.
#[derive(Debug)]
pub struct Signalled<S> {
    inner: S,
    signal: Arc<dyn Signalling>,
}

impl<S: Splitter> Signalled<S> {
    /// Attach `signal` to `inner`
    pub fn new(inner: S, signal: Arc<dyn Signalling>) -> Self {
        Self { inner, signal }
    }

    /// Attach a context that never fires
    pub fn idle(inner: S) -> Self {
        Self::new(inner, Arc::new(IdleSignalling))
    }

    /// Shared signalling context
    pub fn signalling(&self) -> &dyn Signalling {
        self.signal.as_ref()
    }

    /// Owned handle to the signalling context, usable while consuming
    pub fn signal_handle(&self) -> Arc<dyn Signalling> {
        Arc::clone(&self.signal)
    }

    /// Wrapped splitter
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Strip the signalling context
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn wrap(&self, inner: S) -> Self {
        Self {
            inner,
            signal: Arc::clone(&self.signal),
        }
    }
}

impl<S: Splitter> Iterator for Signalled<S> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<S::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Splitter> Splitter for Signalled<S> {
    fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    fn dup(&self) -> Self {
        self.wrap(self.inner.dup())
    }

    fn split(&self) -> Vec<Self> {
        self.inner
            .split()
            .into_iter()
            .map(|child| self.wrap(child))
            .collect()
    }

    fn psplit(&self, sizes: &[usize]) -> Vec<Self> {
        self.inner
            .psplit(sizes)
            .into_iter()
            .map(|child| self.wrap(child))
            .collect()
    }

    fn for_each_remaining<F>(&mut self, f: F)
    where
        F: FnMut(S::Item),
    {
        self.inner.for_each_remaining(f);
    }

    fn reduce_remaining<U, F>(&mut self, op: F) -> Result<U, SplitterError>
    where
        S::Item: Into<U>,
        F: FnMut(U, U) -> U,
    {
        self.inner.reduce_remaining(op)
    }

    fn map_into<T, F, C>(&mut self, f: F, sink: C) -> C
    where
        F: FnMut(S::Item) -> T,
        C: Combiner<T>,
    {
        self.inner.map_into(f, sink)
    }
}
