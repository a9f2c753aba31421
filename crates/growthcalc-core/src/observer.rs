//! Observer pattern for engine notifications.
//!
//! Every observable field of the engine has a matching [`EngineEvent`]
//! variant carrying its new value. `Finished` is the terminal event of a
//! fully completed run and is distinct from field changes.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::sequence::{SequenceKind, SequencePoint};

/// Observable fields of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Base,
    Exponent,
    IsRunning,
    LinearPoints,
    ExponentialPoints,
    StatusLabel,
    LinearResultLabel,
    ExponentialResultLabel,
}

impl Property {
    /// Field name as exposed to front ends.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Property::Base => "base",
            Property::Exponent => "exponent",
            Property::IsRunning => "isRunning",
            Property::LinearPoints => "linearPoints",
            Property::ExponentialPoints => "exponentialPoints",
            Property::StatusLabel => "statusLabel",
            Property::LinearResultLabel => "linearResultLabel",
            Property::ExponentialResultLabel => "exponentialResultLabel",
        }
    }

    /// Points field of a sequence.
    #[must_use]
    pub fn points(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::Linear => Property::LinearPoints,
            SequenceKind::Exponential => Property::ExponentialPoints,
        }
    }

    /// Result label field of a sequence.
    #[must_use]
    pub fn result_label(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::Linear => Property::LinearResultLabel,
            SequenceKind::Exponential => Property::ExponentialResultLabel,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification sent from the engine to observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EngineEvent {
    /// `base` changed.
    BaseChanged { base: f64 },
    /// `exponent` changed.
    ExponentChanged { exponent: i32 },
    /// `isRunning` was written.
    RunningChanged { running: bool },
    /// A point list was emptied at the start of a run.
    PointsCleared { kind: SequenceKind },
    /// A point was appended to a list. `point.index` is its 1-based
    /// position in the list.
    PointAppended {
        kind: SequenceKind,
        point: SequencePoint,
    },
    /// `statusLabel` changed.
    StatusChanged { status: String },
    /// A result label was published or cleared.
    ResultChanged {
        kind: SequenceKind,
        label: Option<String>,
    },
    /// A run completed both stages.
    Finished,
}

impl EngineEvent {
    /// Field this event reports on; `None` for `Finished`.
    #[must_use]
    pub fn property(&self) -> Option<Property> {
        match self {
            EngineEvent::BaseChanged { .. } => Some(Property::Base),
            EngineEvent::ExponentChanged { .. } => Some(Property::Exponent),
            EngineEvent::RunningChanged { .. } => Some(Property::IsRunning),
            EngineEvent::PointsCleared { kind } | EngineEvent::PointAppended { kind, .. } => {
                Some(Property::points(*kind))
            }
            EngineEvent::StatusChanged { .. } => Some(Property::StatusLabel),
            EngineEvent::ResultChanged { kind, .. } => Some(Property::result_label(*kind)),
            EngineEvent::Finished => None,
        }
    }

    /// Whether this is the terminal `Finished` event.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, EngineEvent::Finished)
    }
}

/// Observer trait for receiving engine notifications.
///
/// Called on whichever thread produced the change (the caller of a setter
/// or `stop()`, or the run's worker thread), never while engine state is
/// locked, so implementations may call back into the engine.
///
/// Deliveries are serialized: observers see events in the order the
/// changes were applied, and a slow observer holds up other threads'
/// changes until it returns.
pub trait EngineObserver: Send + Sync {
    /// Receive a notification.
    fn on_event(&self, event: &EngineEvent);
}

/// Subject that manages a collection of observers.
pub struct ObserverSubject {
    observers: RwLock<Vec<Arc<dyn EngineObserver>>>,
}

impl ObserverSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn EngineObserver>) {
        self.observers.write().push(observer);
    }

    /// Notify all observers of an event.
    pub fn notify(&self, event: &EngineEvent) {
        // Clone the list so observers may register others from a callback.
        let observers: Vec<Arc<dyn EngineObserver>> = self.observers.read().clone();
        for observer in &observers {
            observer.on_event(event);
        }
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ObserverSubject {
    fn default() -> Self {
        Self::new()
    }
}
