//! Caller-side measurement
//!
//! Times each [`Strategy`] against one shared workload and, when the
//! [`CountingAllocator`] is installed as the global allocator, records how
//! many heap allocations each strategy makes.

mod allocation;
mod config;

pub use allocation::{AllocSnapshot, CountingAllocator};
pub use config::HarnessConfig;

use std::hint::black_box;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::info;

use crate::strategy::{is_even, records, Strategy};
use crate::FilterError;

/// Errors that can occur while running the harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration invalid (e.g., zero rounds).
    #[error("invalid harness configuration: {0}")]
    InvalidConfiguration(String),

    /// Strategy name not recognised.
    #[error("unknown strategy '{0}' (expected foreach, manual or builtin)")]
    UnknownStrategy(String),

    /// Two strategies counted a different number of matches.
    #[error("{strategy} counted {actual} matches, {baseline} counted {expected}")]
    Disagreement {
        /// Strategy whose count diverged.
        strategy: Strategy,
        /// Count it produced.
        actual: usize,
        /// Strategy used as the reference.
        baseline: Strategy,
        /// Reference count.
        expected: usize,
    },

    /// A strategy failed while filtering.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Measurements for one strategy.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct StrategyReport {
    /// Strategy measured.
    pub strategy: Strategy,
    /// Matches counted in a single round.
    pub matches: usize,
    /// Timed rounds.
    pub rounds: u32,
    /// Wall time over all timed rounds.
    pub total: Duration,
    /// Allocations over all timed rounds (if the counter is installed).
    pub allocations: Option<AllocSnapshot>,
}

impl StrategyReport {
    /// Mean wall time per round.
    pub fn mean(&self) -> Duration {
        self.total / self.rounds.max(1)
    }

    /// Mean allocations per round.
    pub fn allocations_per_round(&self) -> Option<f64> {
        self.allocations
            .map(|snapshot| snapshot.allocations as f64 / f64::from(self.rounds.max(1)))
    }

    /// One-line summary
    pub fn report(&self) -> String {
        let allocations = match self.allocations_per_round() {
            Some(per_round) => format!("{per_round:.1}"),
            None => "n/a".to_string(),
        };
        format!(
            "{:<8} | {:>8} matches | {:>12?} mean | {:>8} allocs/round",
            self.strategy.name(),
            self.matches,
            self.mean(),
            allocations
        )
    }
}

/// Run every configured strategy and check that they agree.
///
/// Pass the installed global [`CountingAllocator`] to record allocations;
/// `None` leaves [`StrategyReport::allocations`] empty.
pub fn run(
    config: &HarnessConfig,
    allocator: Option<&CountingAllocator>,
) -> Result<Vec<StrategyReport>, HarnessError> {
    config.validate()?;

    let items = records(config.elements)?;
    let mut reports = Vec::with_capacity(config.strategies.len());

    for &strategy in &config.strategies {
        for _ in 0..config.warmup {
            black_box(strategy.count(black_box(&items), is_even)?);
        }

        let before = allocator.map(CountingAllocator::snapshot);
        let start = Instant::now();
        let mut matches = 0;
        for _ in 0..config.rounds {
            matches = black_box(strategy.count(black_box(&items), is_even)?);
        }
        let total = start.elapsed();
        let allocations = allocator
            .zip(before)
            .map(|(counter, before)| counter.snapshot().since(before));

        let report = StrategyReport {
            strategy,
            matches,
            rounds: config.rounds,
            total,
            allocations,
        };
        info!(
            strategy = strategy.name(),
            matches,
            mean_ns = report.mean().as_nanos() as u64,
            "strategy measured"
        );
        reports.push(report);
    }

    check_agreement(&reports)?;
    Ok(reports)
}

fn check_agreement(reports: &[StrategyReport]) -> Result<(), HarnessError> {
    let Some(baseline) = reports.first() else {
        return Ok(());
    };
    match reports.iter().find(|report| report.matches != baseline.matches) {
        Some(diverged) => Err(HarnessError::Disagreement {
            strategy: diverged.strategy,
            actual: diverged.matches,
            baseline: baseline.strategy,
            expected: baseline.matches,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(strategy: Strategy, matches: usize) -> StrategyReport {
        StrategyReport {
            strategy,
            matches,
            rounds: 4,
            total: Duration::from_millis(8),
            allocations: Some(AllocSnapshot {
                allocations: 6,
                bytes: 96,
            }),
        }
    }

    #[test]
    fn test_report_means() {
        let r = report(Strategy::Manual, 10);
        assert_eq!(r.mean(), Duration::from_millis(2));
        assert_eq!(r.allocations_per_round(), Some(1.5));
        assert!(r.report().starts_with("manual"));
    }

    #[test]
    fn test_disagreement_is_reported() {
        let reports = [report(Strategy::Foreach, 5), report(Strategy::Manual, 4)];
        match check_agreement(&reports) {
            Err(HarnessError::Disagreement {
                strategy, expected, ..
            }) => {
                assert_eq!(strategy, Strategy::Manual);
                assert_eq!(expected, 5);
            }
            other => panic!("expected disagreement, got {:?}", other),
        }
    }

    #[test]
    fn test_run_without_allocator() {
        let config = HarnessConfig::default()
            .with_elements(100)
            .with_rounds(2)
            .with_warmup(0);
        let reports = run(&config, None).expect("harness runs");
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.matches == 50 && r.allocations.is_none()));
    }
}
