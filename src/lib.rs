//! # Hand-rolled Lazy Filtering
//!
//! This library implements a filter operator as an explicit state machine
//! and benchmarks it against the two obvious alternatives.
//!
//! ## Core Design
//!
//! 1. **Manual enumerator**: cursor phase is a plain enum mutated by hand,
//!    no hidden generator state
//! 2. **Instance reuse**: an unstarted origin serves as its own enumerator
//!    when asked from the thread that built it; other requests fork
//! 3. **Shape dispatch**: slices get an index-driven variant with an eager
//!    [`ArrayFilterSequence::count`]; everything else steps a cursor
//! 4. **Cleanup on failure**: a failing predicate or source releases the
//!    cursor before anything is reported
//!
//! ## Usage Example
//!
//! ```
//! use colander::{filter, Enumerable, Enumerator, Source};
//!
//! let numbers: Vec<i32> = (1..=10).collect();
//! let mut evens = filter(Source::indexable(&numbers), |n: &i32| n % 2 == 0);
//! assert_eq!(evens.count().unwrap(), 5);
//!
//! let mut iter = evens.obtain_iterator();
//! assert!(iter.advance());
//! assert_eq!(iter.current(), Some(&&2));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod dispatch; // Shape-based selection
pub mod enumerator; // Manual state machines
pub mod harness; // Timing and allocation measurement
pub mod predicate; // Element predicates
pub mod source; // Sequence handles and adapters
pub mod strategy; // The three benchmarked filters

// Re-exports for convenience
pub use dispatch::{filter, FilterBuilder, FilteredSequence};
pub use enumerator::{
    ArrayFilterSequence, Enumerable, Enumerator, FilterSpec, GenericFilterSequence, Handle,
    OwnerToken, Phase, ReusedOrigin,
};
pub use predicate::{ByRef, Fallible, Predicate};
pub use source::{Cursor, Iterable, Sequence, Source, TrySequence};

use thiserror::Error;

/// Errors raised by filter construction and enumeration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A required constructor argument was missing
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    /// The operation is never supported (e.g. `reset`)
    #[error("operation not supported: {0}")]
    UnsupportedOperation(&'static str),

    /// The predicate failed while testing an element
    #[error("predicate failed: {0}")]
    Predicate(String),

    /// The wrapped source failed while stepping
    #[error("source failed: {0}")]
    Source(String),
}
