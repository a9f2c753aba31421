//! CLI result presenter.

use std::fmt::Write as _;
use std::time::Duration;

use growthcalc_core::constants::SIGNIFICANT_DIGITS;
use growthcalc_core::format::format_general;
use growthcalc_core::{EngineSnapshot, GrowthError, RunPhase, SequenceKind};

use crate::output::{format_duration, format_points};
use crate::ui;

/// Prints the final state of a run.
pub struct CliResultPresenter {
    verbose: bool,
    quiet: bool,
    json: bool,
}

impl CliResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool, json: bool) -> Self {
        Self {
            verbose,
            quiet,
            json,
        }
    }

    /// Text printed to stdout for a finished run.
    ///
    /// JSON mode renders the whole snapshot, quiet mode only the result
    /// labels that were published.
    pub fn render(&self, snapshot: &EngineSnapshot, elapsed: Duration) -> Result<String, GrowthError> {
        if self.json {
            return snapshot.to_json();
        }

        let mut out = String::new();
        if self.quiet {
            for kind in SequenceKind::ALL {
                if let Some(label) = snapshot.result_label(kind) {
                    let _ = writeln!(out, "{label}");
                }
            }
            return Ok(out);
        }

        let _ = writeln!(
            out,
            "Base: {}  Exponent: {}",
            format_general(snapshot.base, SIGNIFICANT_DIGITS),
            snapshot.exponent
        );
        let _ = writeln!(out, "Duration: {}", format_duration(elapsed));
        for kind in SequenceKind::ALL {
            let points = snapshot.points(kind);
            let _ = writeln!(out);
            if self.verbose {
                out.push_str(&format_points(kind, points));
            }
            let result = snapshot.result_label(kind).unwrap_or("-");
            let _ = writeln!(out, "{kind} ({} points): {result}", points.len());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Status: {}", snapshot.status_label);
        Ok(out)
    }

    /// Print the run, followed by a one-line outcome unless quiet or JSON.
    pub fn present(&self, snapshot: &EngineSnapshot, elapsed: Duration) {
        match self.render(snapshot, elapsed) {
            Ok(text) => print!("{text}"),
            Err(err) => {
                self.present_error(&err.to_string());
                return;
            }
        }
        if self.quiet || self.json {
            return;
        }

        let progress = snapshot.progress();
        match snapshot.phase {
            RunPhase::Completed => ui::print_success("Calculation Complete!"),
            RunPhase::Cancelled => ui::print_warning(&format!(
                "Stopped after {} of {} steps",
                progress.completed_steps, progress.total_steps
            )),
            RunPhase::Rejected => ui::print_error(&snapshot.status_label),
            RunPhase::Idle | RunPhase::Running => {}
        }
    }

    /// Print a header before the run starts.
    pub fn present_start(&self, base: f64, exponent: i32) {
        if self.quiet || self.json {
            return;
        }
        ui::print_header(&format!(
            "Growth of {} over {exponent} steps",
            format_general(base, SIGNIFICANT_DIGITS)
        ));
    }

    pub fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed() -> EngineSnapshot {
        growthcalc_core::run_to_completion(2.0, 5)
    }

    #[test]
    fn quiet_prints_result_labels_only() {
        let presenter = CliResultPresenter::new(false, true, false);
        let text = presenter.render(&completed(), Duration::ZERO).unwrap();
        assert_eq!(text, "Final Result: 10.00\nFinal Result: 32.00\n");
    }

    #[test]
    fn quiet_rejected_prints_nothing() {
        let presenter = CliResultPresenter::new(false, true, false);
        let snap = growthcalc_core::run_to_completion(2.0, 0);
        assert!(presenter.render(&snap, Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn normal_mode_summarizes() {
        let presenter = CliResultPresenter::new(false, false, false);
        let text = presenter.render(&completed(), Duration::from_millis(3)).unwrap();
        assert!(text.contains("Base: 2  Exponent: 5"));
        assert!(text.contains("linear (5 points): Final Result: 10.00"));
        assert!(text.contains("exponential (5 points): Final Result: 32.00"));
        assert!(text.contains("Status: Calculation Complete!"));
        assert!(!text.contains("Step"));
    }

    #[test]
    fn verbose_mode_adds_tables() {
        let presenter = CliResultPresenter::new(true, false, false);
        let text = presenter.render(&completed(), Duration::ZERO).unwrap();
        assert!(text.contains("Step"));
        assert!(text.contains("8.00"));
    }

    #[test]
    fn json_mode_is_snapshot() {
        let presenter = CliResultPresenter::new(false, false, true);
        let snap = completed();
        let text = presenter.render(&snap, Duration::ZERO).unwrap();
        let back: EngineSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn present_does_not_panic_for_any_phase() {
        let presenter = CliResultPresenter::new(false, false, false);
        presenter.present_start(2.0, 5);
        presenter.present(&completed(), Duration::ZERO);
        presenter.present(&growthcalc_core::run_to_completion(2.0, -1), Duration::ZERO);
        presenter.present(&EngineSnapshot::default(), Duration::ZERO);
        presenter.present_error("boom");
    }
}
