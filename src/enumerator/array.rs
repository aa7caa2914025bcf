//! Filter over an in-memory slice.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{swallow, Enumerable, Enumerator, FilterSpec, Handle, OwnerToken, Phase};
use crate::{FilterError, Predicate};

/// Lazy filter reading a slice by index.
///
/// Owns no secondary resource: the source is read in place, so release is
/// a no-op. Also offers [`ArrayFilterSequence::count`], an eager scan that
/// skips the step protocol entirely.
pub struct ArrayFilterSequence<'a, T, P> {
    spec: Arc<FilterSpec<&'a [T], P>>,
    owner: OwnerToken,
    phase: Phase,
    next: usize,
    current: Option<&'a T>,
    failure: Option<FilterError>,
}

impl<'a, T, P> ArrayFilterSequence<'a, T, P>
where
    P: Predicate<T>,
{
    /// Wrap `items`, owned by the calling thread.
    pub fn new(items: &'a [T], predicate: P) -> Self {
        Self::from_spec(Arc::new(FilterSpec::new(items, predicate)), Phase::NotStarted)
    }

    fn from_spec(spec: Arc<FilterSpec<&'a [T], P>>, phase: Phase) -> Self {
        Self {
            spec,
            owner: OwnerToken::current(),
            phase,
            next: 0,
            current: None,
            failure: None,
        }
    }

    /// Shared source/predicate pair.
    pub fn spec(&self) -> &Arc<FilterSpec<&'a [T], P>> {
        &self.spec
    }

    /// Length of the underlying slice.
    pub fn source_len(&self) -> usize {
        self.spec.source().len()
    }

    /// Count matching elements with a direct index scan.
    ///
    /// Never touches the enumeration state, so it is safe to call at any
    /// point, any number of times. Predicate failures propagate.
    pub fn count(&self) -> Result<usize, FilterError> {
        let items = *self.spec.source();
        let predicate = self.spec.predicate();
        let mut total = 0;
        for item in items {
            if predicate.test(item)? {
                total += 1;
            }
        }
        trace!(len = items.len(), total, "eager count");
        Ok(total)
    }

    fn finish(&mut self) {
        self.phase = Phase::Exhausted;
        self.current = None;
    }
}

impl<'a, T, P> Enumerator for ArrayFilterSequence<'a, T, P>
where
    P: Predicate<T>,
{
    type Item = &'a T;

    fn try_advance(&mut self) -> Result<bool, FilterError> {
        if self.phase == Phase::Exhausted {
            return Ok(false);
        }
        self.phase = Phase::InProgress;

        let items = *self.spec.source();
        // `get` guards the empty slice and the one-past-the-end index
        while let Some(item) = items.get(self.next) {
            self.next += 1;
            match self.spec.predicate().test(item) {
                Ok(true) => {
                    self.current = Some(item);
                    return Ok(true);
                }
                Ok(false) => {}
                Err(err) => {
                    self.finish();
                    return Err(err);
                }
            }
        }

        self.finish();
        Ok(false)
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

    fn release(&mut self) {}

    fn last_error(&self) -> Option<&FilterError> {
        self.failure.as_ref()
    }
}

impl<'a, T, P> Enumerable for ArrayFilterSequence<'a, T, P>
where
    P: Predicate<T>,
{
    fn is_reusable(&self) -> bool {
        self.phase == Phase::NotStarted && self.owner.is_current()
    }

    fn fork(&self) -> Self {
        Self::from_spec(Arc::clone(&self.spec), Phase::InProgress)
    }
}

impl<'h, 'a, T, P> IntoIterator for &'h mut ArrayFilterSequence<'a, T, P>
where
    P: Predicate<T>,
{
    type Item = &'a T;
    type IntoIter = Handle<'h, ArrayFilterSequence<'a, T, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.obtain_iterator()
    }
}

impl<'a, T, P> fmt::Debug for ArrayFilterSequence<'a, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayFilterSequence")
            .field("owner", &self.owner)
            .field("phase", &self.phase)
            .field("next", &self.next)
            .field("len", &self.spec.source().len())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}
