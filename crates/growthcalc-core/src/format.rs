//! Number formatting for status and result labels.
//!
//! Three notations are used:
//!
//! - fixed: `42.00` (`FIXED_DECIMALS` places)
//! - general: `%g`-style with `SIGNIFICANT_DIGITS` significant digits,
//!   trailing zeros removed (`2`, `1.5`, `1e+06`)
//! - scientific: `1.500000e+06` (`SCIENTIFIC_PRECISION` places, signed
//!   exponent of at least two digits)
//!
//! Non-finite values render as `inf`, `-inf` and `nan` in every notation.

use crate::constants::{
    labels, FIXED_DECIMALS, SCIENTIFIC_LOWER_BOUND, SCIENTIFIC_PRECISION,
    SCIENTIFIC_UPPER_BOUND,
};

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_sign_negative() {
        "-inf".to_string()
    } else {
        "inf".to_string()
    }
}

/// Render a decimal exponent the way C's `printf` does (`e+06`, `e-07`, `e+123`).
fn c_exponent(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exp.unsigned_abs())
}

/// Split Rust's `{:e}` output (`1.5e6`) into mantissa and exponent.
fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Format with a fixed number of decimal places.
#[must_use]
pub fn format_fixed_with(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    format!("{value:.decimals$}")
}

/// Format with `FIXED_DECIMALS` decimal places.
///
/// ```
/// assert_eq!(growthcalc_core::format::format_fixed(10.0), "10.00");
/// ```
#[must_use]
pub fn format_fixed(value: f64) -> String {
    format_fixed_with(value, FIXED_DECIMALS)
}

/// Format in scientific notation with `precision` digits after the point.
#[must_use]
pub fn format_scientific_with(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let formatted = format!("{value:.precision$e}");
    let (mantissa, exp) = split_exponent(&formatted);
    format!("{mantissa}{}", c_exponent(exp))
}

/// Format in scientific notation with `SCIENTIFIC_PRECISION` digits.
///
/// ```
/// use growthcalc_core::format::format_scientific;
/// assert_eq!(format_scientific(1_500_000.0), "1.500000e+06");
/// assert_eq!(format_scientific(0.000_000_5), "5.000000e-07");
/// ```
#[must_use]
pub fn format_scientific(value: f64) -> String {
    format_scientific_with(value, SCIENTIFIC_PRECISION)
}

/// Format like `printf("%.*g")`: `significant` significant digits, fixed or
/// scientific depending on the decimal exponent, trailing zeros removed.
///
/// ```
/// use growthcalc_core::format::format_general;
/// assert_eq!(format_general(2.0, 6), "2");
/// assert_eq!(format_general(1.5, 6), "1.5");
/// assert_eq!(format_general(1_000_000.0, 6), "1e+06");
/// assert_eq!(format_general(0.0001, 6), "0.0001");
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn format_general(value: f64, significant: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = significant.max(1);
    // Rounding to `precision` digits first gives the exponent %g decides on.
    let rounded = format!("{value:.*e}", precision - 1);
    let (mantissa, exp) = split_exponent(&rounded);

    if exp < -4 || exp >= precision as i32 {
        format!("{}{}", trim_fraction(mantissa), c_exponent(exp))
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Whether an exponential result is shown in scientific notation.
///
/// True when the magnitude exceeds `SCIENTIFIC_UPPER_BOUND`, or when the
/// value is non-zero with a magnitude below `SCIENTIFIC_LOWER_BOUND`.
#[must_use]
pub fn needs_scientific(value: f64) -> bool {
    let magnitude = value.abs();
    magnitude > SCIENTIFIC_UPPER_BOUND || (value != 0.0 && magnitude < SCIENTIFIC_LOWER_BOUND)
}

/// Final label of the linear sequence.
#[must_use]
pub fn linear_result_label(value: f64) -> String {
    format!("{}{}", labels::FINAL_RESULT_PREFIX, format_fixed(value))
}

/// Final label of the exponential sequence.
#[must_use]
pub fn exponential_result_label(value: f64) -> String {
    let text = if needs_scientific(value) {
        format_scientific(value)
    } else {
        format_fixed(value)
    };
    format!("{}{text}", labels::FINAL_RESULT_PREFIX)
}
