//! Concrete observer implementations.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::observer::{EngineEvent, EngineObserver};

/// Observer that logs events with temporal throttling of point updates.
///
/// Point-list and status changes are throttled to one log line per
/// `min_interval_ms`; running-state, result and `Finished` events are
/// always logged.
pub struct LoggingObserver {
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn throttled(&self) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let last = self.last_time.load(Ordering::Relaxed);
        if now.saturating_sub(last) < self.min_interval_ms {
            return true;
        }
        self.last_time.store(now, Ordering::Relaxed);
        false
    }
}

impl EngineObserver for LoggingObserver {
    fn on_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::Finished => info!("Calculation finished"),
            EngineEvent::RunningChanged { running } => {
                info!(running = *running, "Running state changed");
            }
            EngineEvent::ResultChanged {
                kind,
                label: Some(label),
            } => info!(sequence = %kind, result = %label, "Result published"),
            EngineEvent::PointAppended { kind, point } => {
                if !self.throttled() {
                    debug!(
                        sequence = %kind,
                        step = point.index,
                        value = point.value,
                        "Point appended"
                    );
                }
            }
            EngineEvent::StatusChanged { status } => {
                if !self.throttled() {
                    debug!(status = %status, "Status updated");
                }
            }
            other => {
                if let Some(property) = other.property() {
                    debug!(property = %property, "Property changed");
                }
            }
        }
    }
}

/// Observer that keeps every event it receives, in order.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().clone()
    }

    /// Number of `Finished` events recorded.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.events.lock().iter().filter(|e| e.is_finished()).count()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EngineObserver for RecordingObserver {
    fn on_event(&self, event: &EngineEvent) {
        self.events.lock().push(event.clone());
    }
}
