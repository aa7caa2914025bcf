//! Sequence handles
//!
//! A [`Sequence`] is anything that can repeatedly hand out a step-cursor.
//! Re-enumerability matters: every fresh enumerator forked from a
//! [`FilterSpec`](crate::FilterSpec) acquires its own cursor, so two
//! enumerations never share stepping state.

mod adapters;

pub use adapters::{IterCursor, Iterable, SliceCursor, TryCursor, TrySequence};

use crate::FilterError;

/// Step protocol of a generic sequence.
pub trait Cursor {
    /// Element produced by each step.
    type Item;

    /// Produce the next element, `Ok(None)` once the sequence is exhausted.
    fn step(&mut self) -> Result<Option<Self::Item>, FilterError>;

    /// Release whatever the cursor holds. Called at most once per cursor
    /// by the enumerators in this crate.
    fn release(&mut self) {}
}

/// A re-enumerable sequence of unknown length with sequential access only.
pub trait Sequence {
    /// Element type.
    type Item;
    /// Cursor type handed out by [`Sequence::cursor`].
    type Cursor: Cursor<Item = Self::Item>;

    /// Acquire a new step-cursor positioned before the first element.
    fn cursor(&self) -> Self::Cursor;
}

/// Shape of a filter source, decided once when the source is wrapped.
///
/// `Indexable` sources have a known length and are read by offset;
/// everything else goes through the [`Sequence`] step protocol.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a, T, S> {
    /// Fixed-length, zero-based, random-access slice.
    Indexable(&'a [T]),
    /// Sequential-only sequence yielding references into its elements.
    Generic(S),
}

impl<'a, T> Source<'a, T, &'a [T]> {
    /// Wrap a slice as an indexable source.
    pub fn indexable(items: &'a [T]) -> Self {
        Source::Indexable(items)
    }
}

impl<'a, T, S> Source<'a, T, S>
where
    S: Sequence<Item = &'a T>,
{
    /// Wrap a sequence that only supports stepping.
    pub fn generic(sequence: S) -> Self {
        Source::Generic(sequence)
    }
}

impl<'a, T, S> Source<'a, T, S> {
    /// Whether the fast random-access path applies.
    pub fn is_indexable(&self) -> bool {
        matches!(self, Source::Indexable(_))
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    fn cursor(&self) -> Self::Cursor {
        SliceCursor::new(*self)
    }
}
