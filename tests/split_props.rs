use proptest::prelude::*;
use rangesplit::{NumericProgression, RangeSplitter, Splitter};

mod common;
use common::{drain, drain_all, drain_recursive};

fn progressions() -> impl Strategy<Value = NumericProgression<i64>> {
    (-500i64..500, -500i64..500, prop_oneof![-7i64..=-1, 1i64..=7], any::<bool>()).prop_map(
        |(start, end, step, inclusive)| {
            NumericProgression::new(start, end, step, inclusive).expect("nonzero step")
        },
    )
}

proptest! {
    #[test]
    fn next_walks_every_element_once(p in progressions()) {
        let expected: Vec<i64> = (0..p.len()).map(|i| p.get(i).expect("in range")).collect();
        prop_assert_eq!(drain(RangeSplitter::new(p)), expected);
    }

    #[test]
    fn split_children_concatenate_to_parent(p in progressions(), consumed in 0usize..50) {
        let mut s = RangeSplitter::new(p);
        for _ in 0..consumed {
            s.next();
        }
        let n = s.remaining();
        let children = s.split();

        if n < 2 {
            prop_assert_eq!(children.len(), 1);
        } else {
            prop_assert_eq!(children.len(), 2);
            prop_assert_eq!(children[0].remaining(), n / 2);
        }
        let total: usize = children.iter().map(|c| c.remaining()).sum();
        prop_assert_eq!(total, n);
        prop_assert_eq!(s.remaining(), n, "split must not move the receiver");
        prop_assert_eq!(drain_all(children), drain(s));
    }

    #[test]
    fn recursive_split_preserves_order(p in progressions()) {
        let s = RangeSplitter::new(p);
        prop_assert_eq!(drain_recursive(s.dup()), drain(s));
    }

    #[test]
    fn psplit_saturates(p in progressions(), sizes in proptest::collection::vec(0usize..80, 0..6)) {
        let s = RangeSplitter::new(p);
        let n = s.remaining();
        let pieces = s.psplit(&sizes);
        prop_assert_eq!(pieces.len(), sizes.len());

        let mut left = n;
        for (piece, &size) in pieces.iter().zip(&sizes) {
            let expected = size.min(left);
            prop_assert_eq!(piece.remaining(), expected);
            left -= expected;
        }

        let covered = drain_all(pieces);
        let whole = drain(s);
        prop_assert!(covered.len() <= n);
        prop_assert_eq!(&covered[..], &whole[..covered.len()]);
    }

    #[test]
    fn dup_does_not_share_cursor(p in progressions(), steps in 0usize..30) {
        let s = RangeSplitter::new(p);
        let before = s.remaining();
        let mut copy = s.dup();
        for _ in 0..steps {
            copy.next();
        }
        prop_assert_eq!(s.remaining(), before);
        prop_assert_eq!(copy.remaining(), before.saturating_sub(steps));
    }
}
