//! Range splitter behaviour tests
//!
//! Covers the concrete splitting scenarios and the cursor/exhaustion contract

mod common;

use common::{drain, drain_all, splitter};
use rangesplit::{Combiner, Splitter, SplitterError, VecCombiner};

#[test]
fn test_split_ten_elements_in_half() {
    let s = splitter(0, 9, 1, true);
    let children = s.split();

    assert_eq!(children.len(), 2);
    assert_eq!(children[0].remaining_progression().first(), Some(0));
    assert_eq!(children[0].remaining_progression().last(), Some(4));
    assert_eq!(children[1].remaining_progression().first(), Some(5));
    assert_eq!(children[1].remaining_progression().last(), Some(9));
    assert_eq!(drain_all(children), (0..10).collect::<Vec<_>>());
}

#[test]
fn test_split_singleton_yields_one_child() {
    let s = splitter(7, 7, 1, true);
    let children = s.split();

    assert_eq!(children.len(), 1);
    assert_eq!(drain_all(children), vec![7]);
}

#[test]
fn test_split_empty_yields_one_empty_child() {
    let children = splitter(0, 0, 1, false).split();
    assert_eq!(children.len(), 1);
    assert!(!children[0].has_next());
}

#[test]
fn test_psplit_truncates_last_piece() {
    let s = splitter(0, 9, 1, true);
    let pieces = s.psplit(&[3, 3, 10]);

    let sizes: Vec<usize> = pieces.iter().map(|p| p.remaining()).collect();
    assert_eq!(sizes, vec![3, 3, 4]);
    assert_eq!(drain_all(pieces), (0..10).collect::<Vec<_>>());
    // Receiver untouched
    assert_eq!(s.remaining(), 10);
}

#[test]
fn test_psplit_past_end_gives_empty_pieces() {
    let s = splitter(0, 4, 1, false);
    let pieces = s.psplit(&[5, 2, 0]);
    let sizes: Vec<usize> = pieces.iter().map(|p| p.remaining()).collect();
    assert_eq!(sizes, vec![4, 0, 0]);
}

#[test]
fn test_split_after_partial_consumption() {
    let mut s = splitter(0, 20, 2, false);
    s.next();
    s.next();
    let children = s.split();

    assert_eq!(s.remaining(), 8);
    assert_eq!(drain_all(children), vec![4, 6, 8, 10, 12, 14, 16, 18]);
}

#[test]
fn test_next_on_exhausted_splitter_fails() {
    let mut s = splitter(0, 0, 1, false);
    assert!(!s.has_next());
    assert_eq!(s.try_next(), Err(SplitterError::Exhausted));
    assert_eq!(s.remaining(), 0);
}

#[test]
fn test_reduce_sums_and_exhausts() {
    let mut s = splitter(1, 4, 1, true);
    assert_eq!(s.reduce_remaining(|a: i64, b: i64| a + b), Ok(10));
    assert!(!s.has_next());
    assert_eq!(s.remaining(), 0);
}

#[test]
fn test_reduce_on_empty_fails() {
    let mut s = splitter(1, 4, 1, true);
    s.for_each_remaining(|_| {});
    assert_eq!(
        s.reduce_remaining(|a: i64, b: i64| a + b),
        Err(SplitterError::EmptyReduce)
    );
}

#[test]
fn test_reduce_is_left_fold() {
    // ((10 - 9) - 8) - 7
    let mut s = splitter(10, 7, -1, true);
    assert_eq!(s.reduce_remaining(|a: i64, b: i64| a - b), Ok(-14));
}

#[test]
fn test_for_each_visits_in_order_and_exhausts() {
    let mut s = splitter(5, 0, -1, false);
    s.next();
    let mut seen = Vec::new();
    s.for_each_remaining(|x| seen.push(x));

    assert_eq!(seen, vec![4, 3, 2, 1]);
    assert!(!s.has_next());
}

#[test]
fn test_map_into_returns_same_sink() {
    let mut s = splitter(0, 3, 1, true);
    let mut sink = VecCombiner::new();
    sink.push("start".to_string());

    let sink = s.map_into(|x| format!("n{x}"), sink);
    assert_eq!(sink.result(), vec!["start", "n0", "n1", "n2", "n3"]);
    assert_eq!(s.remaining(), 0);
}

#[test]
fn test_dup_is_independent() {
    let mut s = splitter(0, 10, 1, false);
    s.next();
    let mut copy = s.dup();

    assert_eq!(copy.remaining(), 9);
    copy.next();
    copy.next();
    assert_eq!(s.remaining(), 9);

    s.next();
    assert_eq!(copy.remaining(), 7);
    assert_eq!(drain(copy), (3..10).collect::<Vec<_>>());
    assert_eq!(drain(s), (2..10).collect::<Vec<_>>());
}

#[test]
fn test_iterator_adapters_see_exact_size() {
    let s = splitter(0, 100, 7, false);
    assert_eq!(s.len(), 15);
    assert_eq!(s.sum::<i64>(), (0..100).step_by(7).sum::<i64>());
}
