//! Shared fixtures: instrumented sources and drain helpers

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use colander::{Cursor, Enumerator, FilterError, Sequence};

/// Counts cursor traffic for a [`TrackedSequence`]
#[derive(Debug, Default)]
pub struct Ledger {
    pub acquired: Cell<usize>,
    pub released: Cell<usize>,
    pub steps: Cell<usize>,
}

impl Ledger {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Cursors acquired but not yet released
    pub fn outstanding(&self) -> usize {
        self.acquired.get() - self.released.get()
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// Slice-backed sequence that records every acquire, step and release,
/// optionally failing when a given offset is stepped
#[derive(Debug)]
pub struct TrackedSequence<'a, T> {
    items: &'a [T],
    ledger: Rc<Ledger>,
    fail_at: Option<usize>,
}

impl<'a, T> TrackedSequence<'a, T> {
    pub fn new(items: &'a [T], ledger: Rc<Ledger>) -> Self {
        Self {
            items,
            ledger,
            fail_at: None,
        }
    }

    pub fn failing_at(mut self, offset: usize) -> Self {
        self.fail_at = Some(offset);
        self
    }
}

impl<'a, T> Sequence for TrackedSequence<'a, T> {
    type Item = &'a T;
    type Cursor = TrackedCursor<'a, T>;

    fn cursor(&self) -> Self::Cursor {
        bump(&self.ledger.acquired);
        TrackedCursor {
            items: self.items,
            position: 0,
            ledger: Rc::clone(&self.ledger),
            fail_at: self.fail_at,
        }
    }
}

#[derive(Debug)]
pub struct TrackedCursor<'a, T> {
    items: &'a [T],
    position: usize,
    ledger: Rc<Ledger>,
    fail_at: Option<usize>,
}

impl<'a, T> Cursor for TrackedCursor<'a, T> {
    type Item = &'a T;

    fn step(&mut self) -> Result<Option<Self::Item>, FilterError> {
        bump(&self.ledger.steps);
        if self.fail_at == Some(self.position) {
            return Err(FilterError::Source(format!("step {} failed", self.position)));
        }
        let item = self.items.get(self.position);
        if item.is_some() {
            self.position += 1;
        }
        Ok(item)
    }

    fn release(&mut self) {
        bump(&self.ledger.released);
    }
}

/// Advance an enumerator to exhaustion, cloning each current element
pub fn drain<E>(enumerator: &mut E) -> Vec<E::Item>
where
    E: Enumerator + ?Sized,
    E::Item: Clone,
{
    let mut out = Vec::new();
    while enumerator.advance() {
        out.push(
            enumerator
                .current()
                .cloned()
                .expect("current is set after a successful advance"),
        );
    }
    out
}

pub fn is_even(n: &i32) -> bool {
    n % 2 == 0
}
