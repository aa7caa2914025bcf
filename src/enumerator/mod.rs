//! Manual lazy filter enumerators
//!
//! Replaces a suspend/resume generator with an explicit state machine:
//!
//! 1. **Phase**: `NotStarted` → `InProgress` → `Exhausted`, mutated by hand
//! 2. **Reuse**: the originating instance serves as its own enumerator when
//!    asked from its creating thread before it has started
//! 3. **Fork**: every other request gets a fresh instance sharing the same
//!    immutable [`FilterSpec`]
//!
//! No locking anywhere. The owner check is an allocation shortcut for the
//! common single-caller case, not a concurrency guarantee.

mod array;
mod generic;

pub use array::ArrayFilterSequence;
pub use generic::GenericFilterSequence;

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::thread::{self, ThreadId};

use tracing::{debug, warn};

use crate::FilterError;

/// Cursor phase of an enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing consumed yet; the instance may still be reused.
    NotStarted,
    /// Enumeration has begun (or the instance was forked pre-marked).
    InProgress,
    /// Terminal. No further predicate calls or source reads.
    Exhausted,
}

/// Identity of the thread that created an enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerToken(ThreadId);

impl OwnerToken {
    /// Token for the calling thread.
    pub fn current() -> Self {
        Self(thread::current().id())
    }

    /// Whether the calling thread is the one that minted this token.
    pub fn is_current(self) -> bool {
        self == Self::current()
    }
}

/// Immutable (source, predicate) pair shared by every enumerator forked
/// from the same origin.
pub struct FilterSpec<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterSpec<S, P> {
    /// Pair a source with a predicate.
    pub fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The predicate.
    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<S, P> fmt::Debug for FilterSpec<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec").finish_non_exhaustive()
    }
}

/// Stepwise enumeration: advance, then read the current element.
pub trait Enumerator {
    /// Element type.
    type Item;

    /// Move to the next matching element.
    ///
    /// A predicate or source failure releases owned resources first and is
    /// then returned as the error. The enumerator is exhausted afterwards.
    fn try_advance(&mut self) -> Result<bool, FilterError>;

    /// Move to the next matching element, reporting failures as exhaustion.
    ///
    /// The swallowed error stays available through [`Enumerator::last_error`].
    fn advance(&mut self) -> bool;

    /// The element produced by the last successful advance.
    fn current(&self) -> Option<&Self::Item>;

    /// Current cursor phase.
    fn phase(&self) -> Phase;

    /// Rewinding is not supported.
    fn reset(&mut self) -> Result<(), FilterError> {
        Err(FilterError::UnsupportedOperation("reset"))
    }

    /// Release owned resources. Idempotent.
    fn release(&mut self);

    /// The failure most recently swallowed by [`Enumerator::advance`].
    fn last_error(&self) -> Option<&FilterError>;

    /// Drain the remaining elements and count them.
    fn count_remaining(&mut self) -> usize {
        let mut total = 0;
        while self.advance() {
            total += 1;
        }
        total
    }
}

/// Something that hands out enumerators over itself.
pub trait Enumerable: Enumerator + Sized {
    /// Whether [`Enumerable::obtain_iterator`] may hand back `self`.
    fn is_reusable(&self) -> bool;

    /// A fresh instance sharing this one's [`FilterSpec`], pre-marked as
    /// in progress so it is never itself reused.
    fn fork(&self) -> Self;

    /// Get an enumerator: `self` if reusable, otherwise a fork.
    fn obtain_iterator(&mut self) -> Handle<'_, Self> {
        if self.is_reusable() {
            Handle::Reused(ReusedOrigin(self))
        } else {
            debug!("origin not reusable, forking fresh enumerator");
            Handle::Fresh(self.fork())
        }
    }
}

/// Enumerator handed out by [`Enumerable::obtain_iterator`].
///
/// Dropping a handle disposes of the enumeration it drove, so breaking out
/// of a `for` loop releases the step-cursor right away.
#[derive(Debug)]
pub enum Handle<'a, E: Enumerator> {
    /// The originating instance itself.
    Reused(ReusedOrigin<'a, E>),
    /// An independent instance, released by its own drop.
    Fresh(E),
}

impl<'a, E: Enumerator> Handle<'a, E> {
    /// Whether the origin was handed back.
    pub fn is_reused(&self) -> bool {
        matches!(self, Handle::Reused(_))
    }

    /// Take ownership of a fresh enumerator, ending the borrow of the origin.
    pub fn into_fresh(self) -> Option<E> {
        match self {
            Handle::Fresh(enumerator) => Some(enumerator),
            Handle::Reused(_) => None,
        }
    }
}

impl<'a, E: Enumerator> Deref for Handle<'a, E> {
    type Target = E;

    fn deref(&self) -> &E {
        match self {
            Handle::Reused(origin) => origin,
            Handle::Fresh(enumerator) => enumerator,
        }
    }
}

impl<'a, E: Enumerator> DerefMut for Handle<'a, E> {
    fn deref_mut(&mut self) -> &mut E {
        match self {
            Handle::Reused(origin) => origin,
            Handle::Fresh(enumerator) => enumerator,
        }
    }
}

impl<'a, E> Iterator for Handle<'a, E>
where
    E: Enumerator,
    E::Item: Clone,
{
    type Item = E::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current().cloned()
        } else {
            None
        }
    }
}

/// Borrow of an origin serving as its own enumerator.
///
/// Releases the origin on drop once enumeration has begun. An origin that
/// was never advanced is left untouched and stays reusable.
#[derive(Debug)]
pub struct ReusedOrigin<'a, E: Enumerator>(&'a mut E);

impl<'a, E: Enumerator> Deref for ReusedOrigin<'a, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.0
    }
}

impl<'a, E: Enumerator> DerefMut for ReusedOrigin<'a, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.0
    }
}

impl<'a, E: Enumerator> Drop for ReusedOrigin<'a, E> {
    fn drop(&mut self) {
        if self.0.phase() != Phase::NotStarted {
            self.0.release();
        }
    }
}

/// Collapse a failed advance into "no more elements", keeping the error.
///
/// Callers cannot tell this apart from a normal end of sequence unless they
/// check `last_error`; `try_advance` is the propagating alternative.
pub(crate) fn swallow(outcome: Result<bool, FilterError>, slot: &mut Option<FilterError>) -> bool {
    match outcome {
        Ok(more) => more,
        Err(err) => {
            warn!(error = %err, "enumeration failed; reporting exhaustion");
            *slot = Some(err);
            false
        }
    }
}
