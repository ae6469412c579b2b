use proptest::prelude::*;
use trie_brc::trie::{Entry, Trie};
use trie_brc::MiniDec;

type Lines = Vec<(Vec<u8>, i64)>;

fn build(lines: &Lines) -> Trie {
    let mut trie = Trie::new();
    for (key, tenths) in lines {
        let abs = tenths.unsigned_abs();
        let int = i64::try_from(abs / 10).unwrap();
        let frac = u8::try_from(abs % 10).unwrap();
        trie.insert(key, MiniDec::from_parts(*tenths < 0, int, frac));
    }
    trie
}

fn lines_strategy() -> impl Strategy<Value = Lines> {
    prop::collection::vec(
        (
            prop::collection::vec(prop::sample::select(b"abc\xff".to_vec()), 1..4),
            -999i64..=999,
        ),
        0..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn merge_order_independent(a in lines_strategy(), b in lines_strategy(), c in lines_strategy()) {
        let groupings: Vec<Vec<Entry>> = vec![
            build(&a).merge(build(&b)).merge(build(&c)).flatten(),
            build(&a).merge(build(&b).merge(build(&c))).flatten(),
            build(&c).merge(build(&a)).merge(build(&b)).flatten(),
            build(&b).merge(build(&c).merge(build(&a))).flatten(),
            build(&c).merge(build(&b)).merge(build(&a)).flatten(),
        ];

        let mut all = a.clone();
        all.extend(b.iter().cloned());
        all.extend(c.iter().cloned());
        let single = build(&all);
        let distinct = single.len();
        let single = single.flatten();

        for merged in &groupings {
            prop_assert_eq!(merged.len(), distinct);
            for (left, right) in merged.iter().zip(&single) {
                prop_assert_eq!(&left.key, &right.key);
                prop_assert_eq!(left.tally.count, right.tally.count);
                prop_assert_eq!(left.tally.sum(), right.tally.sum());
                prop_assert_eq!(left.tally.min, right.tally.min);
                prop_assert_eq!(left.tally.max, right.tally.max);
                prop_assert_eq!(left.tally.mean(), right.tally.mean());
            }
        }
    }

    #[test]
    fn reinserted_copy_doubles_counts(lines in lines_strategy()) {
        let entries = build(&lines).flatten();

        let mut original = Trie::new();
        let mut copy = Trie::new();
        for e in &entries {
            original.insert_tally(&e.key, e.tally);
            copy.insert_tally(&e.key, e.tally);
        }
        let doubled = original.merge(copy);
        prop_assert_eq!(doubled.len(), entries.len());

        for e in &entries {
            let t = doubled.get(&e.key).unwrap();
            prop_assert_eq!(t.count, e.tally.count * 2);
            prop_assert_eq!(t.min, e.tally.min);
            prop_assert_eq!(t.max, e.tally.max);
            prop_assert_eq!(t.mean(), e.tally.mean());
        }
    }
}
