//! Splitter over a numeric progression
//!
//! State: (range, len, ind) with 0 ≤ ind ≤ len
//! Remaining elements are range[ind..len]; children are built from
//! `range.drop(ind)` so they never alias the parent's cursor.

use std::fmt;
use std::iter::FusedIterator;

use super::{Splitter, SplitterError};
use crate::progression::{Numeric, NumericProgression};

/// Forward cursor over an arithmetic progression.
#[derive(Debug)]
pub struct RangeSplitter<T: Numeric> {
    /// Progression the splitter was created over (fixed)
    range: NumericProgression<T>,

    /// Cached `range.len()`
    len: usize,

    /// Consumption offset
    ind: usize,
}

impl<T: Numeric> RangeSplitter<T> {
    /// Create splitter positioned at the first element
    pub fn new(range: NumericProgression<T>) -> Self {
        Self {
            len: range.len(),
            range,
            ind: 0,
        }
    }

    /// Progression the splitter was created over, consumed part included
    pub fn progression(&self) -> &NumericProgression<T> {
        &self.range
    }

    /// Progression of the elements not yet consumed
    pub fn remaining_progression(&self) -> NumericProgression<T> {
        self.range.drop(self.ind)
    }

    /// Number of elements consumed so far
    pub fn consumed(&self) -> usize {
        self.ind
    }
}

impl<T: Numeric> Iterator for RangeSplitter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let elem = self.range.get(self.ind)?;
        self.ind += 1;
        Some(elem)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.ind;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        self.ind = self.ind.saturating_add(n).min(self.len);
        self.next()
    }
}

impl<T: Numeric> ExactSizeIterator for RangeSplitter<T> {}

impl<T: Numeric> FusedIterator for RangeSplitter<T> {}

impl<T: Numeric> Splitter for RangeSplitter<T> {
    #[inline]
    fn remaining(&self) -> usize {
        self.len - self.ind
    }

    fn dup(&self) -> Self {
        Self::new(self.remaining_progression())
    }

    fn split(&self) -> Vec<Self> {
        let rem = self.remaining_progression();
        let n = rem.len();
        if n < 2 {
            return vec![Self::new(rem)];
        }
        let (left, right) = rem.split_at(n / 2);
        vec![Self::new(left), Self::new(right)]
    }

    fn psplit(&self, sizes: &[usize]) -> Vec<Self> {
        let mut rem = self.remaining_progression();
        sizes
            .iter()
            .map(|&size| {
                let (head, tail) = rem.split_at(size);
                rem = tail;
                Self::new(head)
            })
            .collect()
    }

    fn for_each_remaining<F>(&mut self, mut f: F)
    where
        F: FnMut(T),
    {
        for i in self.ind..self.len {
            if let Some(elem) = self.range.get(i) {
                f(elem);
            }
        }
        self.ind = self.len;
    }

    fn reduce_remaining<U, F>(&mut self, mut op: F) -> Result<U, SplitterError>
    where
        T: Into<U>,
        F: FnMut(U, U) -> U,
    {
        let seed = self.range.get(self.ind).ok_or(SplitterError::EmptyReduce)?;
        let mut acc: U = seed.into();
        for i in self.ind + 1..self.len {
            if let Some(elem) = self.range.get(i) {
                acc = op(acc, elem.into());
            }
        }
        self.ind = self.len;
        Ok(acc)
    }
}

impl<T: Numeric> IntoIterator for NumericProgression<T> {
    type Item = T;
    type IntoIter = RangeSplitter<T>;

    fn into_iter(self) -> RangeSplitter<T> {
        RangeSplitter::new(self)
    }
}

impl<T: Numeric> fmt::Display for RangeSplitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RangeSplitter({}, consumed {} of {})",
            self.remaining_progression(),
            self.ind,
            self.len
        )
    }
}
