//! Engine options and run configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE, DEFAULT_EXPONENT, DEFAULT_STEP_DELAY_MS, MIN_EXPONENT};
use crate::error::GrowthError;

/// Options for the engine itself (not per run).
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Artificial delay between two consecutive steps.
    pub step_delay: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
        }
    }
}

impl EngineOptions {
    /// Options with no artificial delay, for tests and batch runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            step_delay: Duration::ZERO,
        }
    }

    /// Normalize options, clamping the delay to at most one minute.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        let max = Duration::from_secs(60);
        if self.step_delay > max {
            self.step_delay = max;
        }
        self
    }
}

/// Base value and step count of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Value multiplied (linear) or raised (exponential) at each step.
    pub base: f64,
    /// Number of steps; must be at least 1 to run.
    pub exponent: i32,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            exponent: DEFAULT_EXPONENT,
        }
    }
}

impl CalculationConfig {
    /// Create a configuration. No validation happens here.
    #[must_use]
    pub fn new(base: f64, exponent: i32) -> Self {
        Self { base, exponent }
    }

    /// Check that a run with this configuration may produce points.
    pub fn validate(&self) -> Result<(), GrowthError> {
        if self.exponent < MIN_EXPONENT {
            return Err(GrowthError::InvalidConfiguration {
                exponent: self.exponent,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = EngineOptions::default();
        assert_eq!(opts.step_delay, Duration::from_millis(500));
    }

    #[test]
    fn normalize_clamps_long_delay() {
        let opts = EngineOptions {
            step_delay: Duration::from_secs(3600),
        }
        .normalize();
        assert_eq!(opts.step_delay, Duration::from_secs(60));
    }

    #[test]
    fn immediate_has_no_delay() {
        assert!(EngineOptions::immediate().step_delay.is_zero());
    }

    #[test]
    fn default_config() {
        let config = CalculationConfig::default();
        assert!((config.base - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.exponent, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_small_exponent() {
        for exponent in [0, -1, i32::MIN] {
            let result = CalculationConfig::new(2.0, exponent).validate();
            assert_eq!(
                result,
                Err(GrowthError::InvalidConfiguration { exponent })
            );
        }
    }

    #[test]
    fn validate_accepts_one() {
        assert!(CalculationConfig::new(-3.5, 1).validate().is_ok());
    }
}
