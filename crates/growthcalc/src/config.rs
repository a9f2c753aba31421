//! Application configuration from CLI flags and environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use growthcalc_core::{CalculationConfig, EngineOptions, DEFAULT_BASE, DEFAULT_EXPONENT};

/// GrowthCalc-rs: step through a linear and an exponential growth sequence.
///
/// Computes base * i and base^i for i = 1..=exponent, one step at a time,
/// and reports the final value of each sequence.
#[derive(Parser, Debug)]
#[command(name = "growthcalc", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Base of both sequences.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_BASE,
        env = "GROWTHCALC_BASE",
        allow_negative_numbers = true
    )]
    pub base: f64,

    /// Number of steps per sequence (must be at least 1).
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_EXPONENT,
        env = "GROWTHCALC_EXPONENT",
        allow_negative_numbers = true
    )]
    pub exponent: i32,

    /// Pause between steps (e.g., "500ms", "1s", "0ms").
    #[arg(long, default_value = "500ms", env = "GROWTHCALC_DELAY", value_parser = parse_duration)]
    pub delay: Duration,

    /// Stop the run if it has not finished after this long (e.g., "30s", "5m").
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Launch interactive TUI.
    #[arg(long, conflicts_with_all = ["json", "quiet"])]
    pub tui: bool,

    /// Quiet mode (only output the result labels).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (step tables and debug logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the final state as JSON.
    #[arg(long)]
    pub json: bool,

    /// Write the final state as JSON to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Engine options for this invocation.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            step_delay: self.delay,
        }
        .normalize()
    }

    /// Initial engine configuration. Not validated; the engine rejects it
    /// on start.
    #[must_use]
    pub fn calculation_config(&self) -> CalculationConfig {
        CalculationConfig::new(self.base, self.exponent)
    }
}

/// Parse a duration string like "500ms", "30s", "5m", "1h".
///
/// A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let number = |digits: &str| {
        digits
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("invalid duration: {s:?}"))
    };
    if let Some(ms) = s.strip_suffix("ms") {
        Ok(Duration::from_millis(number(ms)?))
    } else if let Some(mins) = s.strip_suffix('m') {
        Ok(Duration::from_secs(number(mins)?.saturating_mul(60)))
    } else if let Some(hours) = s.strip_suffix('h') {
        Ok(Duration::from_secs(number(hours)?.saturating_mul(3600)))
    } else if let Some(secs) = s.strip_suffix('s') {
        Ok(Duration::from_secs(number(secs)?))
    } else {
        Ok(Duration::from_secs(number(s)?))
    }
}
