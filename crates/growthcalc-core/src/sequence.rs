//! The two growth sequences and their points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{labels, SIGNIFICANT_DIGITS};
use crate::format::{
    exponential_result_label, format_fixed, format_general, linear_result_label,
};

/// One computed step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequencePoint {
    /// Step index, starting at 1.
    pub index: i32,
    /// Computed value at this step.
    pub value: f64,
}

impl SequencePoint {
    /// Create a point.
    #[must_use]
    pub fn new(index: i32, value: f64) -> Self {
        Self { index, value }
    }
}

/// Which growth sequence a stage computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// `base * i`
    Linear,
    /// `base^i`
    Exponential,
}

impl SequenceKind {
    /// Both kinds, in the order a run computes them.
    pub const ALL: [SequenceKind; 2] = [SequenceKind::Linear, SequenceKind::Exponential];

    /// Value of this sequence at step `index`.
    ///
    /// ```
    /// use growthcalc_core::sequence::SequenceKind;
    /// assert_eq!(SequenceKind::Linear.value_at(2.0, 5), 10.0);
    /// assert_eq!(SequenceKind::Exponential.value_at(2.0, 5), 32.0);
    /// ```
    #[must_use]
    pub fn value_at(self, base: f64, index: i32) -> f64 {
        match self {
            SequenceKind::Linear => base * f64::from(index),
            SequenceKind::Exponential => base.powf(f64::from(index)),
        }
    }

    /// Status label shown while this stage starts.
    #[must_use]
    pub fn stage_label(self) -> &'static str {
        match self {
            SequenceKind::Linear => labels::LINEAR_STAGE,
            SequenceKind::Exponential => labels::EXPONENTIAL_STAGE,
        }
    }

    /// Status label describing one completed step.
    ///
    /// ```
    /// use growthcalc_core::sequence::SequenceKind;
    /// assert_eq!(
    ///     SequenceKind::Linear.step_label(3, 2.0, 6.0),
    ///     "Linear Step 3: 2 × 3 = 6.00"
    /// );
    /// assert_eq!(
    ///     SequenceKind::Exponential.step_label(3, 2.0, 8.0),
    ///     "Exponential Step 3: 2^3 = 8"
    /// );
    /// ```
    #[must_use]
    pub fn step_label(self, index: i32, base: f64, value: f64) -> String {
        let base = format_general(base, SIGNIFICANT_DIGITS);
        match self {
            SequenceKind::Linear => {
                format!("Linear Step {index}: {base} × {index} = {}", format_fixed(value))
            }
            SequenceKind::Exponential => format!(
                "Exponential Step {index}: {base}^{index} = {}",
                format_general(value, SIGNIFICANT_DIGITS)
            ),
        }
    }

    /// Final result label for the last value of this sequence.
    #[must_use]
    pub fn result_label(self, last_value: f64) -> String {
        match self {
            SequenceKind::Linear => linear_result_label(last_value),
            SequenceKind::Exponential => exponential_result_label(last_value),
        }
    }

    /// Lowercase name, used in logs and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SequenceKind::Linear => "linear",
            SequenceKind::Exponential => "exponential",
        }
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute a whole sequence without delays or notifications.
///
/// Returns an empty vector when `exponent < 1`.
#[must_use]
pub fn compute_sequence(kind: SequenceKind, base: f64, exponent: i32) -> Vec<SequencePoint> {
    (1..=exponent)
        .map(|i| SequencePoint::new(i, kind.value_at(base, i)))
        .collect()
}
