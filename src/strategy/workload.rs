//! Benchmark workload: numbered records, half of them even.

use crate::harness::HarnessError;

/// Element type filtered by every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Payload tested by [`is_even`].
    pub number: i32,
}

/// Records numbered `1..=count`.
///
/// Fails when `count` does not fit in an `i32`.
pub fn records(count: usize) -> Result<Vec<Record>, HarnessError> {
    let upper = i32::try_from(count).map_err(|_| {
        HarnessError::InvalidConfiguration(format!(
            "record count {count} exceeds {}",
            i32::MAX
        ))
    })?;
    Ok((1..=upper).map(|number| Record { number }).collect())
}

/// The benchmark predicate.
#[inline]
pub fn is_even(record: &Record) -> bool {
    record.number % 2 == 0
}
