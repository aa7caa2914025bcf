//! Harness configuration

use super::HarnessError;
use crate::strategy::Strategy;

/// Default workload size, matching the classic 10k-record benchmark.
pub const DEFAULT_ELEMENTS: usize = 10_000;
/// Default number of timed rounds per strategy.
pub const DEFAULT_ROUNDS: u32 = 100;
/// Default number of untimed warmup rounds per strategy.
pub const DEFAULT_WARMUP: u32 = 3;

/// Parameters for [`run`](super::run).
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Records in the workload (numbered `1..=elements`).
    pub elements: usize,
    /// Timed rounds per strategy.
    pub rounds: u32,
    /// Untimed rounds before timing starts.
    pub warmup: u32,
    /// Strategies to measure, in order.
    pub strategies: Vec<Strategy>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            elements: DEFAULT_ELEMENTS,
            rounds: DEFAULT_ROUNDS,
            warmup: DEFAULT_WARMUP,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl HarnessConfig {
    /// Set the workload size.
    pub fn with_elements(mut self, elements: usize) -> Self {
        self.elements = elements;
        self
    }

    /// Set the number of timed rounds.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the number of warmup rounds.
    pub fn with_warmup(mut self, warmup: u32) -> Self {
        self.warmup = warmup;
        self
    }

    /// Set the measured strategies, in order.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Reject configurations the harness cannot run.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.rounds == 0 {
            return Err(HarnessError::InvalidConfiguration(
                "rounds must be > 0".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(HarnessError::InvalidConfiguration(
                "at least one strategy is required".to_string(),
            ));
        }
        if i32::try_from(self.elements).is_err() {
            return Err(HarnessError::InvalidConfiguration(format!(
                "elements must be <= {}, got {}",
                i32::MAX,
                self.elements
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HarnessConfig::default();
        assert_eq!(config.elements, 10_000);
        assert_eq!(config.strategies.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = HarnessConfig::default().with_rounds(0);
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_strategy_list_rejected() {
        let config = HarnessConfig::default().with_strategies(Vec::new());
        assert!(config.strategies.is_empty());
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_strategy_order_is_kept() {
        let config =
            HarnessConfig::default().with_strategies(vec![Strategy::Builtin, Strategy::Manual]);
        assert_eq!(config.strategies, vec![Strategy::Builtin, Strategy::Manual]);
        assert!(config.validate().is_ok());
    }
}
