//! End-to-end filtering through the public entry points

use colander::{
    filter, ArrayFilterSequence, Enumerable, Enumerator, FilterBuilder, FilterError,
    GenericFilterSequence, Iterable, Source,
};
mod common;
use common::*;

#[test]
fn test_evens_from_one_to_ten() {
    let numbers: Vec<i32> = (1..=10).collect();

    let mut array = filter(Source::indexable(&numbers), is_even);
    assert!(array.is_array());
    assert_eq!(array.count().unwrap(), 5);
    let yielded: Vec<i32> = array.obtain_iterator().copied().collect();
    assert_eq!(yielded, vec![2, 4, 6, 8, 10]);

    let mut generic = filter(Source::generic(Iterable::new(numbers.iter())), is_even);
    assert!(!generic.is_array());
    let yielded: Vec<i32> = generic.obtain_iterator().copied().collect();
    assert_eq!(yielded, vec![2, 4, 6, 8, 10]);
}

#[test]
fn test_empty_source() {
    let numbers: Vec<i32> = Vec::new();

    let mut array = ArrayFilterSequence::new(&numbers, |_: &i32| true);
    assert_eq!(array.source_len(), 0);
    assert_eq!(array.count().unwrap(), 0);
    assert!(!array.advance());
    assert_eq!(array.current(), None);

    let mut generic = filter(Source::generic(&numbers[..]), |_: &i32| true);
    assert!(drain(&mut generic).is_empty());
}

#[test]
fn test_for_loop_over_sequence() {
    let words = ["apple", "kiwi", "banana", "fig"];
    let mut long_words = filter(Source::indexable(&words), |w: &&str| w.len() > 3);

    let mut seen = Vec::new();
    for word in &mut long_words {
        seen.push(*word);
    }
    assert_eq!(seen, vec!["apple", "kiwi", "banana"]);
}

#[test]
fn test_generic_filter_over_owned_items() {
    let mut squares = GenericFilterSequence::new(
        Iterable::new((1..).map(|n: u64| n * n)),
        |n: &u64| n % 2 == 1,
    );
    let firsts: Vec<u64> = squares.obtain_iterator().take(4).collect();
    assert_eq!(firsts, vec![1, 9, 25, 49]);
}

#[test]
fn test_current_is_stable_between_advances() {
    let numbers = [3, 6, 9, 12];
    let mut seq = filter(Source::indexable(&numbers), |n: &i32| n % 6 == 0);

    assert_eq!(seq.current(), None);
    assert!(seq.advance());
    for _ in 0..3 {
        assert_eq!(seq.current(), Some(&&6));
    }
    assert!(seq.advance());
    assert_eq!(seq.current(), Some(&&12));
}

#[test]
fn test_builder_validates_arguments() {
    let numbers = [1, 2, 3];

    let missing_source = FilterBuilder::<i32, &[i32], fn(&i32) -> bool>::new()
        .predicate(is_even)
        .build();
    assert!(matches!(
        missing_source,
        Err(FilterError::InvalidArgument("source"))
    ));

    let missing_predicate = FilterBuilder::<i32, &[i32], fn(&i32) -> bool>::new()
        .source(Source::indexable(&numbers))
        .build();
    assert!(matches!(
        missing_predicate,
        Err(FilterError::InvalidArgument("predicate"))
    ));

    let mut built = FilterBuilder::<i32, &[i32], fn(&i32) -> bool>::new()
        .source(Source::indexable(&numbers))
        .predicate(is_even)
        .build()
        .expect("both arguments present");
    assert!(built.is_array());
    assert_eq!(built.count().unwrap(), 1);
}
