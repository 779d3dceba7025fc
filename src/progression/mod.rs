//! Immutable arithmetic progressions
//!
//! Progression = (start, step, length), element i = start + i·step
//! Slicing (take/drop) is O(1): only the triple is recomputed,
//! no element is ever materialized.

mod numeric;

pub use numeric::Numeric;

use std::fmt;
use std::ops::{Range, RangeInclusive};
use thiserror::Error;

/// Errors raised while constructing a progression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    /// A progression cannot have a zero step.
    #[error("step must be nonzero")]
    ZeroStep,

    /// Element count does not fit in `usize`.
    #[error("progression of {count} elements exceeds usize")]
    TooLong {
        /// Number of elements the bounds describe.
        count: i128,
    },

    /// The last element would fall outside the element type.
    #[error("progression of length {len} overflows its element type")]
    OutOfBounds {
        /// Requested length.
        len: usize,
    },
}

/// Immutable arithmetic sequence over an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumericProgression<T: Numeric> {
    /// First element (meaningless when `len == 0`)
    start: T,

    /// Distance between consecutive elements, never zero
    step: T,

    /// Number of elements
    len: usize,
}

impl<T: Numeric> NumericProgression<T> {
    /// Create progression from bounds: `start` up to `end` by `step`.
    ///
    /// With `inclusive`, `end` itself belongs to the progression when it is
    /// reachable from `start`. A step pointing away from `end` yields an empty
    /// progression.
    pub fn new(start: T, end: T, step: T, inclusive: bool) -> Result<Self, ProgressionError> {
        let step_wide = step.to_wide();
        if step_wide == 0 {
            return Err(ProgressionError::ZeroStep);
        }

        // Distance measured in the direction of travel
        let span = if step_wide > 0 {
            end.to_wide() - start.to_wide()
        } else {
            start.to_wide() - end.to_wide()
        };
        let stride = step_wide.abs();

        let count = if span < 0 || (span == 0 && !inclusive) {
            0
        } else if inclusive {
            span / stride + 1
        } else {
            (span + stride - 1) / stride
        };

        let len = usize::try_from(count).map_err(|_| ProgressionError::TooLong { count })?;
        Ok(Self { start, step, len })
    }

    /// Exclusive progression `start..end` by `step`.
    pub fn exclusive(start: T, end: T, step: T) -> Result<Self, ProgressionError> {
        Self::new(start, end, step, false)
    }

    /// Inclusive progression `start..=end` by `step`.
    pub fn inclusive(start: T, end: T, step: T) -> Result<Self, ProgressionError> {
        Self::new(start, end, step, true)
    }

    /// Create progression from its first element, step and length.
    pub fn with_length(start: T, step: T, len: usize) -> Result<Self, ProgressionError> {
        if step.to_wide() == 0 {
            return Err(ProgressionError::ZeroStep);
        }
        if len > 0 {
            let last = (len as i128 - 1)
                .checked_mul(step.to_wide())
                .and_then(|offset| offset.checked_add(start.to_wide()))
                .and_then(T::from_wide);
            if last.is_none() {
                return Err(ProgressionError::OutOfBounds { len });
            }
        }
        Ok(Self { start, step, len })
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the progression has no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nominal first element (also reported for empty progressions)
    pub fn start(&self) -> T {
        self.start
    }

    /// Step between elements
    pub fn step(&self) -> T {
        self.step
    }

    /// Element at index `i`: `start + i·step`, or `None` past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        if i >= self.len {
            return None;
        }
        T::from_wide(self.start.to_wide() + i as i128 * self.step.to_wide())
    }

    /// First element
    pub fn first(&self) -> Option<T> {
        self.get(0)
    }

    /// Last element
    pub fn last(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// First `min(n, len)` elements
    pub fn take(&self, n: usize) -> Self {
        Self {
            start: self.start,
            step: self.step,
            len: n.min(self.len),
        }
    }

    /// Everything after the first `min(n, len)` elements
    pub fn drop(&self, n: usize) -> Self {
        let n = n.min(self.len);
        match self.get(n) {
            Some(start) => Self {
                start,
                step: self.step,
                len: self.len - n,
            },
            // n == len: nothing left
            None => Self {
                start: self.start,
                step: self.step,
                len: 0,
            },
        }
    }

    /// `(take(n), drop(n))`
    pub fn split_at(&self, n: usize) -> (Self, Self) {
        (self.take(n), self.drop(n))
    }
}

impl<T: Numeric> TryFrom<Range<T>> for NumericProgression<T> {
    type Error = ProgressionError;

    fn try_from(range: Range<T>) -> Result<Self, Self::Error> {
        Self::exclusive(range.start, range.end, T::one())
    }
}

impl<T: Numeric> TryFrom<RangeInclusive<T>> for NumericProgression<T> {
    type Error = ProgressionError;

    fn try_from(range: RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (start, end) = range.into_inner();
        Self::inclusive(start, end, T::one())
    }
}

impl<T: Numeric> fmt::Display for NumericProgression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => write!(f, "{}..={} by {}", first, last, self.step),
            _ => write!(f, "empty"),
        }
    }
}
