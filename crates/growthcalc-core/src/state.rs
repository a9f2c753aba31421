//! Engine state and its snapshot form.

use serde::{Deserialize, Serialize};

use crate::error::GrowthError;
use crate::observer::EngineEvent;
use crate::options::CalculationConfig;
use crate::progress::RunProgress;
use crate::sequence::{SequenceKind, SequencePoint};

/// Where the engine is in the run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    /// No run has been started yet.
    #[default]
    Idle,
    /// A run is producing points.
    Running,
    /// The last run completed both stages.
    Completed,
    /// The last run was stopped before it completed.
    Cancelled,
    /// The last run was rejected by the configuration check.
    Rejected,
}

impl RunPhase {
    /// Whether the phase is a terminal state of a started run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunPhase::Completed | RunPhase::Cancelled | RunPhase::Rejected
        )
    }
}

/// Immutable copy of every observable field of the engine.
///
/// The engine keeps its live state in this same shape; the setters below
/// record the events their changes produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub base: f64,
    pub exponent: i32,
    pub is_running: bool,
    pub phase: RunPhase,
    pub linear_points: Vec<SequencePoint>,
    pub exponential_points: Vec<SequencePoint>,
    pub status_label: String,
    pub linear_result_label: Option<String>,
    pub exponential_result_label: Option<String>,
    /// Number of runs started so far.
    pub run: u64,
}

impl EngineSnapshot {
    /// Initial state for a configuration.
    #[must_use]
    pub fn new(config: CalculationConfig) -> Self {
        Self {
            base: config.base,
            exponent: config.exponent,
            is_running: false,
            phase: RunPhase::Idle,
            linear_points: Vec::new(),
            exponential_points: Vec::new(),
            status_label: String::new(),
            linear_result_label: None,
            exponential_result_label: None,
            run: 0,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> CalculationConfig {
        CalculationConfig::new(self.base, self.exponent)
    }

    /// Points of one sequence.
    #[must_use]
    pub fn points(&self, kind: SequenceKind) -> &[SequencePoint] {
        match kind {
            SequenceKind::Linear => &self.linear_points,
            SequenceKind::Exponential => &self.exponential_points,
        }
    }

    /// Result label of one sequence.
    #[must_use]
    pub fn result_label(&self, kind: SequenceKind) -> Option<&str> {
        match kind {
            SequenceKind::Linear => self.linear_result_label.as_deref(),
            SequenceKind::Exponential => self.exponential_result_label.as_deref(),
        }
    }

    /// Progress of the current (or last) run.
    #[must_use]
    pub fn progress(&self) -> RunProgress {
        RunProgress::new(
            self.exponent,
            self.linear_points.len(),
            self.exponential_points.len(),
        )
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GrowthError> {
        serde_json::to_string_pretty(self).map_err(|e| GrowthError::Serialization(e.to_string()))
    }

    #[allow(clippy::float_cmp)]
    pub(crate) fn set_base(&mut self, base: f64, events: &mut Vec<EngineEvent>) {
        if self.base != base {
            self.base = base;
            events.push(EngineEvent::BaseChanged { base });
        }
    }

    pub(crate) fn set_exponent(&mut self, exponent: i32, events: &mut Vec<EngineEvent>) {
        if self.exponent != exponent {
            self.exponent = exponent;
            events.push(EngineEvent::ExponentChanged { exponent });
        }
    }

    /// Enter `phase`. Always notifies `isRunning`, even when unchanged.
    pub(crate) fn set_phase(&mut self, phase: RunPhase, events: &mut Vec<EngineEvent>) {
        self.phase = phase;
        self.is_running = phase == RunPhase::Running;
        events.push(EngineEvent::RunningChanged {
            running: self.is_running,
        });
    }

    pub(crate) fn set_status(&mut self, status: String, events: &mut Vec<EngineEvent>) {
        if self.status_label != status {
            self.status_label.clone_from(&status);
            events.push(EngineEvent::StatusChanged { status });
        }
    }

    pub(crate) fn clear_points(&mut self, events: &mut Vec<EngineEvent>) {
        for kind in SequenceKind::ALL {
            self.points_mut(kind).clear();
            events.push(EngineEvent::PointsCleared { kind });
        }
    }

    pub(crate) fn push_point(
        &mut self,
        kind: SequenceKind,
        point: SequencePoint,
        events: &mut Vec<EngineEvent>,
    ) {
        self.points_mut(kind).push(point);
        events.push(EngineEvent::PointAppended { kind, point });
    }

    pub(crate) fn set_result(
        &mut self,
        kind: SequenceKind,
        label: Option<String>,
        events: &mut Vec<EngineEvent>,
    ) {
        let slot = match kind {
            SequenceKind::Linear => &mut self.linear_result_label,
            SequenceKind::Exponential => &mut self.exponential_result_label,
        };
        if *slot != label {
            slot.clone_from(&label);
            events.push(EngineEvent::ResultChanged { kind, label });
        }
    }

    fn points_mut(&mut self, kind: SequenceKind) -> &mut Vec<SequencePoint> {
        match kind {
            SequenceKind::Linear => &mut self.linear_points,
            SequenceKind::Exponential => &mut self.exponential_points,
        }
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self::new(CalculationConfig::default())
    }
}
