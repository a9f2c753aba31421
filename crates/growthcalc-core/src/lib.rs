//! # growthcalc-core
//!
//! Core library for GrowthCalc-rs: a stateful engine that steps through a
//! linear (`base * i`) and an exponential (`base^i`) growth sequence,
//! reporting every step to observers and stopping cooperatively.

pub mod constants;
pub mod engine;
pub mod error;
pub mod format;
pub mod observer;
pub mod observers;
pub mod options;
pub mod progress;
pub mod sequence;
pub mod state;

// Re-exports
pub use constants::{exit_codes, DEFAULT_BASE, DEFAULT_EXPONENT, DEFAULT_STEP_DELAY_MS};
pub use engine::GrowthEngine;
pub use error::GrowthError;
pub use observer::{EngineEvent, EngineObserver, ObserverSubject, Property};
pub use options::{CalculationConfig, EngineOptions};
pub use progress::{CancellationToken, RunProgress};
pub use sequence::{SequenceKind, SequencePoint};
pub use state::{EngineSnapshot, RunPhase};

/// Run both stages without step delays and return the final state.
///
/// This is a convenience for batch use; front ends drive a
/// [`GrowthEngine`] instead.
///
/// # Example
/// ```
/// let snap = growthcalc_core::run_to_completion(2.0, 5);
/// assert_eq!(snap.linear_result_label.as_deref(), Some("Final Result: 10.00"));
/// assert_eq!(snap.exponential_result_label.as_deref(), Some("Final Result: 32.00"));
/// ```
#[must_use]
pub fn run_to_completion(base: f64, exponent: i32) -> EngineSnapshot {
    let engine = GrowthEngine::with_config(
        EngineOptions::immediate(),
        CalculationConfig::new(base, exponent),
    );
    engine.start();
    engine.wait(None);
    engine.snapshot()
}
