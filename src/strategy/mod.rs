//! The three benchmarked filtering strategies
//!
//! - `foreach`: generator-style, the loop state hidden inside a closure
//!   behind a boxed iterator
//! - `manual`: the hand-rolled enumerators of this crate
//! - `builtin`: `Iterator::filter`

mod workload;

pub use workload::{is_even, records, Record};

use std::fmt;
use std::iter;
use std::str::FromStr;

use crate::harness::HarnessError;
use crate::{filter, FilterError, Source};

/// Filtering strategy under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Strategy {
    /// Generator-style closure iterator.
    Foreach,
    /// Hand-rolled manual enumerator.
    Manual,
    /// Standard library `Iterator::filter`.
    Builtin,
}

impl Strategy {
    /// Every strategy, in report order.
    pub const ALL: [Strategy; 3] = [Strategy::Foreach, Strategy::Manual, Strategy::Builtin];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Foreach => "foreach",
            Strategy::Manual => "manual",
            Strategy::Builtin => "builtin",
        }
    }

    /// Count the elements of `items` accepted by `predicate`.
    pub fn count<'a, T, P>(self, items: &'a [T], predicate: P) -> Result<usize, FilterError>
    where
        P: Fn(&T) -> bool + 'a,
    {
        match self {
            Strategy::Foreach => Ok(foreach_filter(items, move |item: &&T| predicate(item)).count()),
            Strategy::Manual => filter(Source::indexable(items), predicate).count(),
            Strategy::Builtin => Ok(items.iter().filter(|item| predicate(item)).count()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HarnessError::UnknownStrategy(s.to_string()))
    }
}

/// Generator-style lazy filter.
///
/// The resume point lives in the captured iterator; the box stands in for
/// the heap-allocated state object a generator needs.
pub fn foreach_filter<'a, I, P>(source: I, predicate: P) -> Box<dyn Iterator<Item = I::Item> + 'a>
where
    I: IntoIterator,
    I::IntoIter: 'a,
    P: Fn(&I::Item) -> bool + 'a,
{
    let mut inner = source.into_iter();
    Box::new(iter::from_fn(move || {
        for item in inner.by_ref() {
            if predicate(&item) {
                return Some(item);
            }
        }
        None
    }))
}
