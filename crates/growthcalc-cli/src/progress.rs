//! Progress bar driven by engine events.

use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use growthcalc_core::{EngineEvent, EngineObserver, SequenceKind};

const TEMPLATE: &str = "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta {eta}) {msg}";

/// Observer that renders a run as an `indicatif` progress bar.
///
/// The bar spans both stages (`2 × exponent` steps). Its position is the
/// sum of the two point counts and its message is the status label.
pub struct CliProgressObserver {
    bar: ProgressBar,
    linear: AtomicU64,
    exponential: AtomicU64,
}

impl CliProgressObserver {
    /// Progress bar for a run with `exponent` steps per stage.
    #[must_use]
    pub fn new(exponent: i32) -> Self {
        let total = u64::try_from(exponent.max(0)).unwrap_or(0) * 2;
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        Self::with_bar(bar)
    }

    /// Observer that tracks progress without drawing anything.
    #[must_use]
    pub fn hidden(exponent: i32) -> Self {
        let observer = Self::new(exponent);
        observer.bar.set_draw_target(ProgressDrawTarget::hidden());
        observer
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            linear: AtomicU64::new(0),
            exponential: AtomicU64::new(0),
        }
    }

    /// Steps completed so far across both stages.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current bar message (the last status label).
    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Whether the bar has been finished or abandoned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn counter(&self, kind: SequenceKind) -> &AtomicU64 {
        match kind {
            SequenceKind::Linear => &self.linear,
            SequenceKind::Exponential => &self.exponential,
        }
    }

    fn set_count(&self, kind: SequenceKind, count: u64) {
        self.counter(kind).store(count, Ordering::Relaxed);
        let pos = self.linear.load(Ordering::Relaxed) + self.exponential.load(Ordering::Relaxed);
        self.bar.set_position(pos);
    }
}

impl EngineObserver for CliProgressObserver {
    fn on_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::RunningChanged { running: true } => {
                self.bar.reset();
            }
            EngineEvent::PointsCleared { kind } => self.set_count(*kind, 0),
            EngineEvent::PointAppended { kind, point } => {
                // The index of an appended point is the new list length.
                self.set_count(*kind, u64::try_from(point.index).unwrap_or(0));
            }
            EngineEvent::StatusChanged { status } => {
                self.bar.set_message(status.clone());
            }
            EngineEvent::RunningChanged { running: false } => {
                // Left as-is when stopped early; `Finished` redraws it full.
                self.bar.abandon();
            }
            EngineEvent::Finished => {
                self.bar.finish();
            }
            _ => {}
        }
    }
}
