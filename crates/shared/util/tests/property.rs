use proptest::prelude::*;
use sn_util::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    AddRange(i32, i32),
    Remove(i32),
    RemoveRange(i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50..50i32).prop_map(Op::Add),
        (-50..50i32, 0..12i32).prop_map(|(s, w)| Op::AddRange(s, s + w)),
        (-50..50i32).prop_map(Op::Remove),
        (-50..50i32, 0..12i32).prop_map(|(s, w)| Op::RemoveRange(s, s + w)),
    ]
}

proptest! {
    #[test]
    fn ranges_match_reference_model(ops in proptest::collection::vec(op(), 0..64)) {
        let mut set = IntRangeSet::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Add(v) => {
                    prop_assert_eq!(set.add(v), model.insert(v));
                },
                Op::AddRange(s, e) => {
                    let before = model.len();
                    model.extend(s..=e);
                    prop_assert_eq!(set.add_range(IntRange::range_of(s, e)), model.len() != before);
                },
                Op::Remove(v) => {
                    prop_assert_eq!(set.remove(v), model.remove(&v));
                },
                Op::RemoveRange(s, e) => {
                    let before = model.len();
                    model.retain(|v| !(s..=e).contains(v));
                    prop_assert_eq!(set.remove_range(IntRange::range_of(s, e)), model.len() != before);
                },
            }
        }

        for v in -70..70 {
            prop_assert_eq!(set.contains(v), model.contains(&v));
            prop_assert_eq!(set.contains(v), set.ranges().any(|r| r.contains(v)));
        }

        let ranges: Vec<IntRange> = set.ranges().collect();
        for pair in ranges.windows(2) {
            prop_assert!(i64::from(pair[0].end()) + 1 < i64::from(pair[1].start()));
        }

        prop_assert_eq!(set.len(), model.len() as u64);
        prop_assert_eq!(set.values().collect::<Vec<_>>(), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(set.to_string().parse::<IntRangeSet>().unwrap(), set);
    }
}
