//! Error handling and exit codes.

use growthcalc_core::{exit_codes, GrowthError, RunPhase};

/// Exit code for the final phase of a CLI run.
///
/// Timeouts are reported as [`GrowthError::Timeout`] through
/// [`handle_error`] instead.
#[must_use]
pub fn exit_code_for(phase: RunPhase) -> i32 {
    match phase {
        RunPhase::Completed => exit_codes::SUCCESS,
        RunPhase::Rejected => exit_codes::ERROR_CONFIG,
        RunPhase::Cancelled => exit_codes::ERROR_CANCELED,
        RunPhase::Idle | RunPhase::Running => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for an error that ended the application.
#[must_use]
pub fn handle_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<GrowthError>() {
        Some(GrowthError::InvalidConfiguration { .. } | GrowthError::Config(_)) => {
            exit_codes::ERROR_CONFIG
        }
        Some(GrowthError::Cancelled) => exit_codes::ERROR_CANCELED,
        Some(GrowthError::Timeout(_)) => exit_codes::ERROR_TIMEOUT,
        Some(GrowthError::Serialization(_)) | None => exit_codes::ERROR_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_codes() {
        assert_eq!(exit_code_for(RunPhase::Completed), 0);
        assert_eq!(exit_code_for(RunPhase::Rejected), 4);
        assert_eq!(exit_code_for(RunPhase::Cancelled), 130);
        assert_eq!(exit_code_for(RunPhase::Idle), 1);
        assert_eq!(exit_code_for(RunPhase::Running), 1);
    }

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&GrowthError::Cancelled.into()), 130);
        assert_eq!(handle_error(&GrowthError::Timeout("5m".into()).into()), 2);
        assert_eq!(handle_error(&GrowthError::Config("bad".into()).into()), 4);
        assert_eq!(
            handle_error(&GrowthError::InvalidConfiguration { exponent: 0 }.into()),
            4
        );
        assert_eq!(handle_error(&anyhow::anyhow!("io failure")), 1);
    }
}
