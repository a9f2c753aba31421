//! Property-based tests for the growth engine.
//!
//! These drive a real `GrowthEngine` with no step delay and check the
//! point lists, labels, and cancellation behaviour for random inputs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use growthcalc_core::format::{exponential_result_label, format_fixed, needs_scientific};
use growthcalc_core::{
    CalculationConfig, EngineEvent, EngineObserver, EngineOptions, GrowthEngine, RunPhase,
    SequenceKind,
};

const WAIT: Option<Duration> = Some(Duration::from_secs(30));

fn engine(base: f64, exponent: i32) -> GrowthEngine {
    GrowthEngine::with_config(
        EngineOptions::immediate(),
        CalculationConfig::new(base, exponent),
    )
}

/// Stops the engine as soon as a sequence reaches `after` points.
struct StopAfter {
    engine: GrowthEngine,
    kind: SequenceKind,
    after: usize,
    fired: AtomicBool,
}

impl EngineObserver for StopAfter {
    fn on_event(&self, event: &EngineEvent) {
        if let EngineEvent::PointAppended { kind, point } = event {
            if *kind == self.kind
                && usize::try_from(point.index) == Ok(self.after)
                && !self.fired.swap(true, Ordering::SeqCst)
            {
                self.engine.stop();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A completed run has one linear point per step with value base * i.
    #[test]
    fn linear_points_complete(base in -1000.0f64..1000.0, exponent in 1i32..40) {
        let engine = engine(base, exponent);
        engine.start();
        prop_assert!(engine.wait(WAIT));

        let points = engine.points(SequenceKind::Linear);
        prop_assert_eq!(points.len(), exponent as usize);
        for (i, point) in points.iter().enumerate() {
            let index = i as i32 + 1;
            prop_assert_eq!(point.index, index);
            prop_assert_eq!(point.value, base * f64::from(index));
        }
    }

    /// A completed run has one exponential point per step with value base^i.
    #[test]
    fn exponential_points_complete(base in -10.0f64..10.0, exponent in 1i32..40) {
        let engine = engine(base, exponent);
        engine.start();
        prop_assert!(engine.wait(WAIT));

        let points = engine.points(SequenceKind::Exponential);
        prop_assert_eq!(points.len(), exponent as usize);
        for (i, point) in points.iter().enumerate() {
            let index = i as i32 + 1;
            prop_assert_eq!(point.index, index);
            prop_assert_eq!(point.value.to_bits(), base.powf(f64::from(index)).to_bits());
        }
        prop_assert_eq!(engine.phase(), RunPhase::Completed);
    }

    /// Any exponent below 1 is rejected without points or results.
    #[test]
    fn small_exponent_rejected(base in -100.0f64..100.0, exponent in i32::MIN..1) {
        let engine = engine(base, exponent);
        engine.start();
        prop_assert!(engine.wait(WAIT));

        let snap = engine.snapshot();
        prop_assert!(!snap.is_running);
        prop_assert!(snap.linear_points.is_empty());
        prop_assert!(snap.exponential_points.is_empty());
        prop_assert_eq!(snap.status_label.as_str(), "Exponent must be at least 1");
        prop_assert_eq!(snap.linear_result_label, None);
        prop_assert_eq!(snap.exponential_result_label, None);
    }

    /// Stopping after k linear points leaves exactly k points and no results.
    #[test]
    fn cancel_after_k_linear_steps(exponent in 2i32..30, k_seed in 0usize..1000) {
        let k = 1 + k_seed % (exponent as usize - 1);
        let engine = engine(1.5, exponent);
        engine.register(Arc::new(StopAfter {
            engine: engine.clone(),
            kind: SequenceKind::Linear,
            after: k,
            fired: AtomicBool::new(false),
        }));
        engine.start();
        prop_assert!(engine.wait(WAIT));

        let snap = engine.snapshot();
        prop_assert_eq!(snap.phase, RunPhase::Cancelled);
        prop_assert!(!snap.is_running);
        prop_assert_eq!(snap.linear_points.len(), k);
        prop_assert_eq!(snap.linear_result_label, None);
        prop_assert!(snap.exponential_points.is_empty());
        prop_assert_eq!(snap.exponential_result_label, None);
    }

    /// Stopping during the exponential stage keeps the linear result only.
    #[test]
    fn cancel_during_exponential_stage(exponent in 2i32..30, k_seed in 0usize..1000) {
        let k = 1 + k_seed % (exponent as usize - 1);
        let engine = engine(2.0, exponent);
        engine.register(Arc::new(StopAfter {
            engine: engine.clone(),
            kind: SequenceKind::Exponential,
            after: k,
            fired: AtomicBool::new(false),
        }));
        engine.start();
        prop_assert!(engine.wait(WAIT));

        let snap = engine.snapshot();
        prop_assert_eq!(snap.linear_points.len(), exponent as usize);
        prop_assert!(snap.linear_result_label.is_some());
        prop_assert_eq!(snap.exponential_points.len(), k);
        prop_assert_eq!(snap.exponential_result_label, None);
    }

    /// The exponential label is scientific exactly when the magnitude rule says so.
    #[test]
    fn exponential_label_notation(value in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let label = exponential_result_label(value);
        let text = label.strip_prefix("Final Result: ");
        prop_assert!(text.is_some());
        let text = text.unwrap_or_default();
        if needs_scientific(value) {
            prop_assert!(text.contains("e+") || text.contains("e-"));
        } else {
            prop_assert_eq!(text, format_fixed(value));
        }
    }
}
