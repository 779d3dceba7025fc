//! Append-only aggregation sinks
//!
//! Leaves push mapped elements into a combiner; the executor later joins
//! the combiners of sibling leaves left-to-right.

/// Append-only sink that accumulates elements and can be merged with a sibling.
pub trait Combiner<T>: Send {
    /// Value produced once aggregation is finished.
    type Output;

    /// Append one element.
    fn push(&mut self, elem: T);

    /// Number of elements appended so far.
    fn len(&self) -> usize;

    /// Whether nothing has been appended.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hint that roughly `additional` more elements will be pushed.
    fn size_hint(&mut self, _additional: usize) {}

    /// Ordered concatenation: all of `self`, then all of `other`.
    fn combine(self, other: Self) -> Self
    where
        Self: Sized;

    /// Finish aggregation.
    fn result(self) -> Self::Output;
}

/// Combiner backed by a `Vec`, preserving push order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecCombiner<T> {
    items: Vec<T>,
}

impl<T> VecCombiner<T> {
    /// Create an empty combiner
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty combiner with reserved capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Elements appended so far, in order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for VecCombiner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Combiner<T> for VecCombiner<T> {
    type Output = Vec<T>;

    fn push(&mut self, elem: T) {
        self.items.push(elem);
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn size_hint(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    fn combine(mut self, mut other: Self) -> Self {
        if self.items.is_empty() {
            return other;
        }
        self.items.append(&mut other.items);
        self
    }

    fn result(self) -> Vec<T> {
        self.items
    }
}

impl<T> Extend<T> for VecCombiner<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
