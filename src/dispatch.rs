//! Shape-based selection between the two filter specializations.

use std::fmt;

use tracing::trace;

use crate::enumerator::{
    ArrayFilterSequence, Enumerable, Enumerator, GenericFilterSequence, Handle, Phase,
};
use crate::predicate::ByRef;
use crate::source::{Sequence, Source};
use crate::{FilterError, Predicate};

/// Filter chosen by [`filter`]: indexable sources get the array fast path.
pub enum FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
{
    /// Built over an indexable source.
    Array(ArrayFilterSequence<'a, T, P>),
    /// Built over a step-only source.
    Generic(GenericFilterSequence<S, ByRef<P>>),
}

/// Build a lazy filtered view of `source`.
///
/// The source shape is inspected here, once; the chosen specialization
/// never re-checks it per element.
///
/// ```
/// use colander::{filter, Enumerable, Source};
///
/// let numbers: Vec<i32> = (1..=10).collect();
/// let mut evens = filter(Source::indexable(&numbers), |n: &i32| n % 2 == 0);
/// let seen: Vec<i32> = evens.obtain_iterator().copied().collect();
/// assert_eq!(seen, [2, 4, 6, 8, 10]);
/// ```
pub fn filter<'a, T, S, P>(source: Source<'a, T, S>, predicate: P) -> FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    match source {
        Source::Indexable(items) => {
            trace!(len = items.len(), "selected indexable filter");
            FilteredSequence::Array(ArrayFilterSequence::new(items, predicate))
        }
        Source::Generic(sequence) => {
            trace!("selected generic filter");
            FilteredSequence::Generic(GenericFilterSequence::new(sequence, ByRef(predicate)))
        }
    }
}

impl<'a, T, S, P> FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    /// Whether the array specialization was selected.
    pub fn is_array(&self) -> bool {
        matches!(self, FilteredSequence::Array(_))
    }

    /// Number of matching elements.
    ///
    /// The array variant answers with its eager index scan. The generic
    /// variant has no shortcut and enumerates via [`Enumerable::obtain_iterator`],
    /// which consumes the origin when it is still reusable.
    pub fn count(&mut self) -> Result<usize, FilterError> {
        match self {
            FilteredSequence::Array(array) => array.count(),
            FilteredSequence::Generic(_) => {
                let mut enumerator = self.obtain_iterator();
                let mut total = 0;
                while enumerator.try_advance()? {
                    total += 1;
                }
                Ok(total)
            }
        }
    }
}

impl<'a, T, S, P> Enumerator for FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    type Item = &'a T;

    fn try_advance(&mut self) -> Result<bool, FilterError> {
        match self {
            FilteredSequence::Array(array) => array.try_advance(),
            FilteredSequence::Generic(generic) => generic.try_advance(),
        }
    }

    fn advance(&mut self) -> bool {
        match self {
            FilteredSequence::Array(array) => array.advance(),
            FilteredSequence::Generic(generic) => generic.advance(),
        }
    }

    fn current(&self) -> Option<&Self::Item> {
        match self {
            FilteredSequence::Array(array) => array.current(),
            FilteredSequence::Generic(generic) => generic.current(),
        }
    }

    fn phase(&self) -> Phase {
        match self {
            FilteredSequence::Array(array) => array.phase(),
            FilteredSequence::Generic(generic) => generic.phase(),
        }
    }

    fn release(&mut self) {
        match self {
            FilteredSequence::Array(array) => array.release(),
            FilteredSequence::Generic(generic) => generic.release(),
        }
    }

    fn last_error(&self) -> Option<&FilterError> {
        match self {
            FilteredSequence::Array(array) => array.last_error(),
            FilteredSequence::Generic(generic) => generic.last_error(),
        }
    }
}

impl<'a, T, S, P> Enumerable for FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    fn is_reusable(&self) -> bool {
        match self {
            FilteredSequence::Array(array) => array.is_reusable(),
            FilteredSequence::Generic(generic) => generic.is_reusable(),
        }
    }

    fn fork(&self) -> Self {
        match self {
            FilteredSequence::Array(array) => FilteredSequence::Array(array.fork()),
            FilteredSequence::Generic(generic) => FilteredSequence::Generic(generic.fork()),
        }
    }
}

impl<'h, 'a, T, S, P> IntoIterator for &'h mut FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    type Item = &'a T;
    type IntoIter = Handle<'h, FilteredSequence<'a, T, S, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.obtain_iterator()
    }
}

impl<'a, T, S, P> fmt::Debug for FilteredSequence<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilteredSequence::Array(array) => f.debug_tuple("Array").field(array).finish(),
            FilteredSequence::Generic(generic) => f.debug_tuple("Generic").field(generic).finish(),
        }
    }
}

/// Validating construction path for callers whose arguments may be absent.
///
/// ```
/// use colander::{FilterBuilder, FilterError, Source};
///
/// let numbers = [1, 2, 3];
/// let missing = FilterBuilder::<i32, &[i32], fn(&i32) -> bool>::new()
///     .source(Source::indexable(&numbers))
///     .build();
/// assert!(matches!(missing, Err(FilterError::InvalidArgument("predicate"))));
/// ```
pub struct FilterBuilder<'a, T, S, P> {
    source: Option<Source<'a, T, S>>,
    predicate: Option<P>,
}

impl<'a, T, S, P> FilterBuilder<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    /// Empty builder.
    pub fn new() -> Self {
        Self {
            source: None,
            predicate: None,
        }
    }

    /// Set the source.
    pub fn source(mut self, source: Source<'a, T, S>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the predicate.
    pub fn predicate(mut self, predicate: P) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Validate and dispatch to [`filter`].
    pub fn build(self) -> Result<FilteredSequence<'a, T, S, P>, FilterError> {
        let source = self.source.ok_or(FilterError::InvalidArgument("source"))?;
        let predicate = self.predicate.ok_or(FilterError::InvalidArgument("predicate"))?;
        Ok(filter(source, predicate))
    }
}

impl<'a, T, S, P> Default for FilterBuilder<'a, T, S, P>
where
    S: Sequence<Item = &'a T>,
    P: Predicate<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, S, P> fmt::Debug for FilterBuilder<'a, T, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("has_source", &self.source.is_some())
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}
