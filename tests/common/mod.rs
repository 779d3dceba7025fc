//! Shared helpers for integration tests

#![allow(dead_code)]

use rangesplit::{NumericProgression, RangeSplitter, Splitter};

/// Splitter over `start..end` (or `start..=end`) by `step`.
pub fn splitter(start: i64, end: i64, step: i64, inclusive: bool) -> RangeSplitter<i64> {
    RangeSplitter::new(
        NumericProgression::new(start, end, step, inclusive).expect("valid progression"),
    )
}

/// Consume a splitter completely.
pub fn drain<S: Splitter>(mut splitter: S) -> Vec<S::Item> {
    splitter.by_ref().collect()
}

/// Drain several splitters in order and concatenate their elements.
pub fn drain_all<S: Splitter>(splitters: Vec<S>) -> Vec<S::Item> {
    splitters.into_iter().flat_map(drain).collect()
}

/// Drain a splitter by splitting it recursively down to single elements.
pub fn drain_recursive<S: Splitter>(splitter: S) -> Vec<S::Item> {
    let children = splitter.split();
    if children.len() == 1 {
        return drain_all(children);
    }
    children.into_iter().flat_map(drain_recursive).collect()
}
