//! Error type for growth sequence runs.

use crate::constants::labels;

/// Error type for growth sequence runs.
///
/// Only `InvalidConfiguration` is ever visible to front ends, and only as
/// the status label text: the worker runs detached from any caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrowthError {
    /// The exponent is below the minimum step count.
    #[error("{}", labels::EXPONENT_TOO_SMALL)]
    InvalidConfiguration {
        /// The rejected exponent.
        exponent: i32,
    },

    /// The run was stopped before it completed.
    #[error("calculation cancelled")]
    Cancelled,

    /// The run was stopped by a deadline.
    #[error("calculation timed out after {0}")]
    Timeout(String),

    /// Invalid option value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Snapshot could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_displays_status_text() {
        let err = GrowthError::InvalidConfiguration { exponent: 0 };
        assert_eq!(err.to_string(), "Exponent must be at least 1");
    }

    #[test]
    fn error_display() {
        assert_eq!(GrowthError::Cancelled.to_string(), "calculation cancelled");
        assert_eq!(
            GrowthError::Timeout("5s".into()).to_string(),
            "calculation timed out after 5s"
        );
        assert_eq!(
            GrowthError::Config("bad delay".into()).to_string(),
            "configuration error: bad delay"
        );
    }
}
