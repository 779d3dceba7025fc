//! Coverage ledger
//!
//! Records which element indices were assigned to the leaves of one
//! execution, 1 bit per index. Spans come from each leaf's `remaining()`
//! at split time, not from what the leaf consumed, so a complete,
//! overlap-free ledger certifies that the splits partitioned the
//! top-level splitter.

use std::ops::Range;

use bitvec::prelude::*;
use thiserror::Error;

/// Coverage violations detected by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// An index was assigned to more than one leaf.
    #[error("index {index} covered more than once")]
    Overlap {
        /// First index found twice.
        index: usize,
    },

    /// A span reaches past the end of the ledger.
    #[error("span ending at {end} exceeds ledger of {len} indices")]
    OutOfRange {
        /// Exclusive end of the offending span.
        end: usize,
        /// Ledger size.
        len: usize,
    },

    /// Some index was never assigned to a leaf.
    #[error("index {first_missing} never covered")]
    Incomplete {
        /// Lowest uncovered index.
        first_missing: usize,
    },
}

/// Bit-per-index record of covered elements.
#[derive(Debug, Clone)]
pub struct CoverageLedger {
    /// Coverage flags
    marked: BitVec,

    /// Count of set flags
    covered: usize,
}

impl CoverageLedger {
    /// Create ledger for `len` indices, none covered
    pub fn new(len: usize) -> Self {
        Self {
            marked: bitvec![0; len],
            covered: 0,
        }
    }

    /// Number of indices tracked
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// Whether the ledger tracks no indices
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Number of indices covered so far
    pub fn covered(&self) -> usize {
        self.covered
    }

    /// Mark every index in `span` covered.
    ///
    /// Fails without modifying the ledger if any index is already marked.
    pub fn mark(&mut self, span: Range<usize>) -> Result<(), LedgerError> {
        if span.end > self.len() {
            return Err(LedgerError::OutOfRange {
                end: span.end,
                len: self.len(),
            });
        }
        if span.is_empty() {
            return Ok(());
        }

        let slots = &mut self.marked[span.clone()];
        if let Some(offset) = slots.first_one() {
            return Err(LedgerError::Overlap {
                index: span.start + offset,
            });
        }
        slots.fill(true);
        self.covered += span.len();
        Ok(())
    }

    /// Whether every index was covered
    pub fn is_complete(&self) -> bool {
        self.covered == self.len()
    }

    /// Check that every index was covered
    pub fn verify(&self) -> Result<(), LedgerError> {
        match self.marked.first_zero() {
            Some(first_missing) => Err(LedgerError::Incomplete { first_missing }),
            None => Ok(()),
        }
    }

    /// Space used by the flags, in bytes
    pub fn space_usage(&self) -> usize {
        (self.len() + 7) / 8
    }
}
