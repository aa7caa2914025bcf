//! Adapters turning std iterators into [`Sequence`]s.

use std::fmt::Display;
use std::slice;

use super::{Cursor, Sequence};
use crate::FilterError;

/// Cursor over a slice, stepping front to back.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> SliceCursor<'a, T> {
    pub(crate) fn new(items: &'a [T]) -> Self {
        Self { inner: items.iter() }
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    #[inline]
    fn step(&mut self) -> Result<Option<Self::Item>, FilterError> {
        Ok(self.inner.next())
    }
}

/// Any clonable [`IntoIterator`] viewed as a re-enumerable sequence.
///
/// Each cursor starts from a clone of the wrapped value, so ranges,
/// slice iterators and unbounded iterators like `0..` all work.
#[derive(Debug, Clone)]
pub struct Iterable<I> {
    inner: I,
}

impl<I> Iterable<I>
where
    I: IntoIterator + Clone,
{
    /// Wrap an iterable.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I> Sequence for Iterable<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;
    type Cursor = IterCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor {
            inner: self.inner.clone().into_iter(),
        }
    }
}

/// Cursor over an infallible iterator.
#[derive(Debug)]
pub struct IterCursor<It> {
    inner: It,
}

impl<It: Iterator> Cursor for IterCursor<It> {
    type Item = It::Item;

    #[inline]
    fn step(&mut self) -> Result<Option<Self::Item>, FilterError> {
        Ok(self.inner.next())
    }
}

/// A sequence whose steps can fail.
///
/// Wraps an iterable of `Result<T, E>`; an `Err` surfaces as
/// [`FilterError::Source`] from [`Cursor::step`].
#[derive(Debug, Clone)]
pub struct TrySequence<I> {
    inner: I,
}

impl<I, T, E> TrySequence<I>
where
    I: IntoIterator<Item = Result<T, E>> + Clone,
    E: Display,
{
    /// Wrap a fallible iterable.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I, T, E> Sequence for TrySequence<I>
where
    I: IntoIterator<Item = Result<T, E>> + Clone,
    E: Display,
{
    type Item = T;
    type Cursor = TryCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        TryCursor {
            inner: self.inner.clone().into_iter(),
        }
    }
}

/// Cursor over an iterator of results.
#[derive(Debug)]
pub struct TryCursor<It> {
    inner: It,
}

impl<It, T, E> Cursor for TryCursor<It>
where
    It: Iterator<Item = Result<T, E>>,
    E: Display,
{
    type Item = T;

    fn step(&mut self) -> Result<Option<Self::Item>, FilterError> {
        match self.inner.next() {
            Some(Ok(item)) => Ok(Some(item)),
            Some(Err(err)) => Err(FilterError::Source(err.to_string())),
            None => Ok(None),
        }
    }
}
