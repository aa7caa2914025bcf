//! Element predicates
//!
//! A predicate is shared by every enumerator forked from the same
//! [`FilterSpec`](crate::FilterSpec), so it is `Fn`, never `FnMut`.

use std::fmt::{self, Display};

use crate::FilterError;

/// Decides whether an element passes the filter.
pub trait Predicate<T: ?Sized> {
    /// Test a single element. An `Err` aborts the enumeration.
    fn test(&self, item: &T) -> Result<bool, FilterError>;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    #[inline]
    fn test(&self, item: &T) -> Result<bool, FilterError> {
        Ok(self(item))
    }
}

/// Adapts a closure that can fail.
///
/// ```
/// use colander::{Fallible, Predicate};
///
/// let positive = Fallible(|n: &i32| {
///     if *n == 0 { Err("zero has no sign") } else { Ok(*n > 0) }
/// });
/// assert!(positive.test(&3).unwrap());
/// assert!(positive.test(&0).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<T: ?Sized, F, E> Predicate<T> for Fallible<F>
where
    F: Fn(&T) -> Result<bool, E>,
    E: Display,
{
    #[inline]
    fn test(&self, item: &T) -> Result<bool, FilterError> {
        (self.0)(item).map_err(|err| FilterError::Predicate(err.to_string()))
    }
}

impl<F> fmt::Debug for Fallible<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fallible(..)")
    }
}

/// Lifts a predicate over `T` to one over `&T`.
///
/// Generic sources hand out references to their elements while the
/// indexable path tests elements in place; this lets one predicate
/// serve both.
#[derive(Clone, Copy)]
pub struct ByRef<P>(pub P);

impl<'r, T: ?Sized, P> Predicate<&'r T> for ByRef<P>
where
    P: Predicate<T>,
{
    #[inline]
    fn test(&self, item: &&'r T) -> Result<bool, FilterError> {
        self.0.test(*item)
    }
}

impl<P> fmt::Debug for ByRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ByRef(..)")
    }
}
