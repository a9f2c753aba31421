//! Constants for growth sequence defaults, label text, and formatting.

/// Default base value for a fresh engine.
pub const DEFAULT_BASE: f64 = 2.0;

/// Default exponent (step count) for a fresh engine.
pub const DEFAULT_EXPONENT: i32 = 5;

/// Default artificial delay between two steps, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 500;

/// Smallest exponent accepted by a run.
pub const MIN_EXPONENT: i32 = 1;

/// Decimal places used for linear values and fixed-point results.
pub const FIXED_DECIMALS: usize = 2;

/// Significant digits used for `%g`-style step values.
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Digits after the decimal point in scientific results.
pub const SCIENTIFIC_PRECISION: usize = 6;

/// Magnitudes strictly above this switch the exponential result to scientific notation.
pub const SCIENTIFIC_UPPER_BOUND: f64 = 1e6;

/// Non-zero magnitudes strictly below this switch the exponential result to scientific notation.
pub const SCIENTIFIC_LOWER_BOUND: f64 = 1e-6;

/// Status and result label text.
pub mod labels {
    /// Status shown when a run is rejected.
    pub const EXPONENT_TOO_SMALL: &str = "Exponent must be at least 1";
    /// Status shown when the linear stage begins.
    pub const LINEAR_STAGE: &str = "Calculating Linear Growth...";
    /// Status shown when the exponential stage begins.
    pub const EXPONENTIAL_STAGE: &str = "Calculating Exponential Growth...";
    /// Status shown after both stages complete.
    pub const COMPLETE: &str = "Calculation Complete!";
    /// Prefix of both final result labels.
    pub const FINAL_RESULT_PREFIX: &str = "Final Result: ";
}

/// Process exit codes.
pub mod exit_codes {
    /// Run completed.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Run stopped by `--timeout`.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Run rejected because of its configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Run cancelled by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
