use colander::strategy::{records, Record, Strategy};
use colander::{filter, ArrayFilterSequence, Enumerable, Enumerator, Iterable, Source};
use proptest::prelude::*;
mod common;
use common::drain;

proptest! {
    #[test]
    fn variants_match_reference_filter(
        items in proptest::collection::vec(any::<i32>(), 0..200),
        modulus in 1i32..7,
    ) {
        let keep = move |n: &i32| n.rem_euclid(modulus) == 0;
        let expected: Vec<i32> = items.iter().copied().filter(|n| keep(n)).collect();

        let mut array = filter(Source::indexable(&items), keep);
        let mut generic = filter(Source::generic(Iterable::new(items.iter())), keep);
        let from_array: Vec<i32> = array.obtain_iterator().copied().collect();
        let from_generic: Vec<i32> = generic.obtain_iterator().copied().collect();

        prop_assert_eq!(&from_array, &expected, "array variant diverged");
        prop_assert_eq!(&from_generic, &expected, "generic variant diverged");
    }

    #[test]
    fn eager_count_matches_enumeration(
        items in proptest::collection::vec(-50i32..50, 0..200),
        threshold in -50i32..50,
    ) {
        let mut seq = ArrayFilterSequence::new(&items, move |n: &i32| *n > threshold);
        let counted = seq.count().expect("infallible predicate");
        let yielded = drain(&mut seq).len();
        prop_assert_eq!(counted, yielded);
        prop_assert_eq!(
            seq.count().expect("infallible predicate"),
            counted,
            "count must not depend on cursor state"
        );
    }

    #[test]
    fn partial_enumeration_does_not_change_count(
        items in proptest::collection::vec(0u8..10, 1..100),
        consumed in 0usize..20,
    ) {
        let mut seq = ArrayFilterSequence::new(&items, |n: &u8| n % 3 == 0);
        let before = seq.count().expect("infallible predicate");
        for _ in 0..consumed {
            seq.advance();
        }
        prop_assert_eq!(seq.count().expect("infallible predicate"), before);
    }

    #[test]
    fn strategies_agree(elements in 0usize..3_000) {
        let items = records(elements).expect("workload fits in i32");
        let reference = elements / 2;
        for strategy in Strategy::ALL {
            let counted = strategy
                .count(&items, |r: &Record| r.number % 2 == 0)
                .expect("infallible predicate");
            prop_assert_eq!(counted, reference, "{} diverged", strategy);
        }
    }
}
