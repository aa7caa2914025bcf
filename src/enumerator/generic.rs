//! Filter over a sequential-only source.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{swallow, Enumerable, Enumerator, FilterSpec, Handle, OwnerToken, Phase};
use crate::source::{Cursor, Sequence};
use crate::{FilterError, Predicate};

/// Lazy filter driving the wrapped sequence's own step protocol.
///
/// The step-cursor is acquired on the first advance, not at construction,
/// and is released on exhaustion, on failure, on [`Enumerator::release`]
/// and on drop.
pub struct GenericFilterSequence<S: Sequence, P> {
    spec: Arc<FilterSpec<S, P>>,
    owner: OwnerToken,
    phase: Phase,
    cursor: Option<S::Cursor>,
    current: Option<S::Item>,
    failure: Option<FilterError>,
}

impl<S, P> GenericFilterSequence<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    /// Wrap `source`, owned by the calling thread.
    pub fn new(source: S, predicate: P) -> Self {
        Self::from_spec(Arc::new(FilterSpec::new(source, predicate)), Phase::NotStarted)
    }

    fn from_spec(spec: Arc<FilterSpec<S, P>>, phase: Phase) -> Self {
        Self {
            spec,
            owner: OwnerToken::current(),
            phase,
            cursor: None,
            current: None,
            failure: None,
        }
    }

    /// Shared source/predicate pair.
    pub fn spec(&self) -> &Arc<FilterSpec<S, P>> {
        &self.spec
    }

    /// Whether a step-cursor is currently held.
    pub fn holds_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    fn scan(&mut self) -> Result<bool, FilterError> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(false);
        };
        while let Some(item) = cursor.step()? {
            if self.spec.predicate().test(&item)? {
                self.current = Some(item);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn finish(&mut self) {
        self.release_cursor();
        self.phase = Phase::Exhausted;
        self.current = None;
    }
}

impl<S: Sequence, P> GenericFilterSequence<S, P> {
    fn release_cursor(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            trace!("releasing step-cursor");
            cursor.release();
        }
    }
}

impl<S, P> Enumerator for GenericFilterSequence<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    type Item = S::Item;

    fn try_advance(&mut self) -> Result<bool, FilterError> {
        if self.phase == Phase::Exhausted {
            return Ok(false);
        }
        if self.cursor.is_none() {
            trace!("acquiring step-cursor");
            self.cursor = Some(self.spec.source().cursor());
            self.phase = Phase::InProgress;
        }

        match self.scan() {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.finish();
                Ok(false)
            }
            Err(err) => {
                self.finish();
                Err(err)
            }
        }
    }

    fn advance(&mut self) -> bool {
        let outcome = self.try_advance();
        swallow(outcome, &mut self.failure)
    }

    fn current(&self) -> Option<&Self::Item> {
        self.current.as_ref()
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn release(&mut self) {
        self.release_cursor();
        self.phase = Phase::Exhausted;
        self.current = None;
    }

    fn last_error(&self) -> Option<&FilterError> {
        self.failure.as_ref()
    }
}

impl<S, P> Enumerable for GenericFilterSequence<S, P>
where
    S: Sequence,
    P: Predicate<S::Item>,
{
    fn is_reusable(&self) -> bool {
        self.phase == Phase::NotStarted && self.owner.is_current()
    }

    fn fork(&self) -> Self {
        Self::from_spec(Arc::clone(&self.spec), Phase::InProgress)
    }
}

impl<S: Sequence, P> Drop for GenericFilterSequence<S, P> {
    fn drop(&mut self) {
        self.release_cursor();
    }
}

impl<'h, S, P> IntoIterator for &'h mut GenericFilterSequence<S, P>
where
    S: Sequence,
    S::Item: Clone,
    P: Predicate<S::Item>,
{
    type Item = S::Item;
    type IntoIter = Handle<'h, GenericFilterSequence<S, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.obtain_iterator()
    }
}

impl<S: Sequence, P> fmt::Debug for GenericFilterSequence<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericFilterSequence")
            .field("owner", &self.owner)
            .field("phase", &self.phase)
            .field("holds_cursor", &self.cursor.is_some())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Iterable;

    #[test]
    fn cursor_is_acquired_lazily_and_released_on_exhaustion() {
        let mut seq = GenericFilterSequence::new(Iterable::new(1..=4), |n: &i32| n % 2 == 0);
        assert!(!seq.holds_cursor());

        assert!(seq.advance());
        assert!(seq.holds_cursor());
        assert_eq!(seq.current(), Some(&2));

        assert!(seq.advance());
        assert!(!seq.advance());
        assert!(!seq.holds_cursor());
        assert_eq!(seq.phase(), Phase::Exhausted);
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn unbounded_source_is_filtered_lazily() {
        let mut seq = GenericFilterSequence::new(Iterable::new(1u64..), |n: &u64| n % 7 == 0);
        let firsts: Vec<u64> = seq.obtain_iterator().take(3).collect();
        assert_eq!(firsts, vec![7, 14, 21]);
    }

    #[test]
    fn forks_start_pre_marked() {
        let seq = GenericFilterSequence::new(Iterable::new(0..3), |_: &i32| true);
        let fork = seq.fork();
        assert_eq!(fork.phase(), Phase::InProgress);
        assert!(!fork.is_reusable());
        assert!(Arc::ptr_eq(seq.spec(), fork.spec()));
    }

    #[test]
    fn release_is_idempotent() {
        let mut seq = GenericFilterSequence::new(Iterable::new(0..10), |_: &i32| true);
        assert!(seq.advance());
        seq.release();
        seq.release();
        assert!(!seq.holds_cursor());
        assert!(!seq.advance());
    }
}
