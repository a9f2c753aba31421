//! The growth sequence engine.
//!
//! `GrowthEngine` owns the configuration and run state, and steps through
//! the linear then exponential stage on a worker thread. The handle is
//! cheap to clone; all clones control the same engine.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, ReentrantMutex};
use tracing::{debug, error, info};

use crate::constants::labels;
use crate::error::GrowthError;
use crate::observer::{EngineEvent, EngineObserver, ObserverSubject};
use crate::options::{CalculationConfig, EngineOptions};
use crate::progress::CancellationToken;
use crate::sequence::{SequenceKind, SequencePoint};
use crate::state::{EngineSnapshot, RunPhase};

struct EngineState {
    snapshot: EngineSnapshot,
    /// Token of the run in progress, if any.
    token: Option<CancellationToken>,
    /// Worker threads that have not yet delivered their last notification.
    active_workers: usize,
}

struct Shared {
    /// Held from a change until its events are delivered, so observers see
    /// changes in the order they were applied. Reentrant so observers can
    /// call back into the engine.
    delivery: ReentrantMutex<()>,
    state: Mutex<EngineState>,
    settled: Condvar,
    subject: ObserverSubject,
    options: EngineOptions,
}

/// Handle to a growth sequence engine.
#[derive(Clone)]
pub struct GrowthEngine {
    shared: Arc<Shared>,
}

impl GrowthEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self::with_config(options, CalculationConfig::default())
    }

    /// Create an engine with an initial configuration.
    #[must_use]
    pub fn with_config(options: EngineOptions, config: CalculationConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                delivery: ReentrantMutex::new(()),
                state: Mutex::new(EngineState {
                    snapshot: EngineSnapshot::new(config),
                    token: None,
                    active_workers: 0,
                }),
                settled: Condvar::new(),
                subject: ObserverSubject::new(),
                options: options.normalize(),
            }),
        }
    }

    /// Register an observer for all subsequent events.
    pub fn register(&self, observer: Arc<dyn EngineObserver>) {
        self.shared.subject.register(observer);
    }

    /// Options the engine was created with.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.shared.options
    }

    /// Copy of every observable field.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        self.shared.state.lock().snapshot.clone()
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.shared.state.lock().snapshot.base
    }

    #[must_use]
    pub fn exponent(&self) -> i32 {
        self.shared.state.lock().snapshot.exponent
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().snapshot.is_running
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.shared.state.lock().snapshot.phase
    }

    #[must_use]
    pub fn status_label(&self) -> String {
        self.shared.state.lock().snapshot.status_label.clone()
    }

    #[must_use]
    pub fn points(&self, kind: SequenceKind) -> Vec<SequencePoint> {
        self.shared.state.lock().snapshot.points(kind).to_vec()
    }

    #[must_use]
    pub fn result_label(&self, kind: SequenceKind) -> Option<String> {
        self.shared
            .state
            .lock()
            .snapshot
            .result_label(kind)
            .map(str::to_string)
    }

    /// Set the base. Notifies only if the value changes.
    ///
    /// A run in progress keeps the configuration it started with.
    pub fn set_base(&self, base: f64) {
        self.mutate(|state, events| state.snapshot.set_base(base, events));
    }

    /// Set the exponent. Notifies only if the value changes; not validated here.
    pub fn set_exponent(&self, exponent: i32) {
        self.mutate(|state, events| state.snapshot.set_exponent(exponent, events));
    }

    /// Set base and exponent.
    pub fn configure(&self, base: f64, exponent: i32) {
        self.mutate(|state, events| {
            state.snapshot.set_base(base, events);
            state.snapshot.set_exponent(exponent, events);
        });
    }

    /// Start a run with the current configuration.
    ///
    /// Ignored while a run is in progress. Otherwise clears both point
    /// lists and result labels, sets `isRunning`, and hands the stepping
    /// to a worker thread before returning.
    pub fn start(&self) {
        let launch = self.mutate(|state, events| {
            if state.snapshot.is_running {
                return None;
            }
            let token = CancellationToken::new();
            state.token = Some(token.clone());
            state.active_workers += 1;
            state.snapshot.run += 1;
            state.snapshot.clear_points(events);
            for kind in SequenceKind::ALL {
                state.snapshot.set_result(kind, None, events);
            }
            state.snapshot.set_phase(RunPhase::Running, events);
            Some((state.snapshot.run, state.snapshot.config(), token))
        });

        let Some((run, config, token)) = launch else {
            debug!("Start ignored: a run is already in progress");
            return;
        };
        info!(run, base = config.base, exponent = config.exponent, "Run started");

        let engine = self.clone();
        let worker_token = token.clone();
        let spawned = thread::Builder::new()
            .name(format!("growth-run-{run}"))
            .spawn(move || engine.run_worker(run, config, &worker_token));

        if let Err(err) = spawned {
            error!(run, %err, "Failed to spawn run worker");
            token.cancel();
            self.mutate(|state, events| {
                if state.snapshot.run == run && state.snapshot.is_running {
                    state.token = None;
                    state.snapshot.set_phase(RunPhase::Cancelled, events);
                }
            });
            self.worker_exited();
        }
    }

    /// Stop the run in progress.
    ///
    /// Clears `isRunning` and notifies immediately. The worker halts at its
    /// next step boundary; its step delay is interrupted.
    pub fn stop(&self) {
        self.mutate(|state, events| {
            if let Some(token) = state.token.take() {
                token.cancel();
                info!(run = state.snapshot.run, "Run cancelled");
            }
            let phase = if state.snapshot.is_running {
                RunPhase::Cancelled
            } else {
                state.snapshot.phase
            };
            state.snapshot.set_phase(phase, events);
        });
    }

    /// Block until no run is in progress and every worker has delivered
    /// its last notification.
    ///
    /// Returns `false` if `timeout` elapsed first. A timeout too large to
    /// represent waits without a deadline. Must not be called from an
    /// observer callback.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        let mut state = self.shared.state.lock();
        while state.snapshot.is_running || state.active_workers > 0 {
            match deadline {
                Some(deadline) => {
                    if self
                        .shared
                        .settled
                        .wait_until(&mut state, deadline)
                        .timed_out()
                    {
                        return !state.snapshot.is_running && state.active_workers == 0;
                    }
                }
                None => self.shared.settled.wait(&mut state),
            }
        }
        true
    }

    /// Apply a state change under the lock, then deliver its events before
    /// any later change can be delivered.
    fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EngineState, &mut Vec<EngineEvent>) -> R,
    {
        let _delivery = self.shared.delivery.lock();
        let mut events = Vec::new();
        let result = {
            let mut state = self.shared.state.lock();
            f(&mut state, &mut events)
        };
        for event in &events {
            self.shared.subject.notify(event);
        }
        result
    }

    /// Like `mutate`, but only if `token` has not been cancelled. The check,
    /// the change and the delivery happen under the delivery lock, so a
    /// stopped run never writes or notifies again.
    fn guarded<F>(&self, token: &CancellationToken, f: F) -> Result<(), GrowthError>
    where
        F: FnOnce(&mut EngineState, &mut Vec<EngineEvent>),
    {
        self.mutate(|state, events| {
            token.check_cancelled()?;
            f(state, events);
            Ok(())
        })
    }

    fn worker_exited(&self) {
        let mut state = self.shared.state.lock();
        state.active_workers = state.active_workers.saturating_sub(1);
        self.shared.settled.notify_all();
    }

    fn run_worker(&self, run: u64, config: CalculationConfig, token: &CancellationToken) {
        match self.execute(run, config, token) {
            Ok(()) => info!(run, "Run completed"),
            Err(GrowthError::Cancelled) => debug!(run, "Worker observed cancellation"),
            Err(err) => info!(run, %err, "Run rejected"),
        }
        self.worker_exited();
    }

    fn execute(
        &self,
        run: u64,
        config: CalculationConfig,
        token: &CancellationToken,
    ) -> Result<(), GrowthError> {
        if let Err(err) = config.validate() {
            self.guarded(token, |state, events| {
                state.token = None;
                state.snapshot.set_status(err.to_string(), events);
                state.snapshot.set_phase(RunPhase::Rejected, events);
            })?;
            return Err(err);
        }

        for kind in SequenceKind::ALL {
            self.run_stage(run, kind, config, token)?;
        }

        self.guarded(token, |state, events| {
            state.token = None;
            state
                .snapshot
                .set_status(labels::COMPLETE.to_string(), events);
            state.snapshot.set_phase(RunPhase::Completed, events);
            events.push(EngineEvent::Finished);
        })
    }

    fn run_stage(
        &self,
        run: u64,
        kind: SequenceKind,
        config: CalculationConfig,
        token: &CancellationToken,
    ) -> Result<(), GrowthError> {
        let CalculationConfig { base, exponent } = config;

        // The first point is published without a delay.
        let mut last = kind.value_at(base, 1);
        self.guarded(token, |state, events| {
            state
                .snapshot
                .set_status(kind.stage_label().to_string(), events);
            state
                .snapshot
                .push_point(kind, SequencePoint::new(1, last), events);
        })?;
        debug!(run, stage = %kind, step = 1, value = last, "Step computed");

        for index in 2..=exponent {
            token.sleep(self.shared.options.step_delay)?;
            let value = kind.value_at(base, index);
            self.guarded(token, |state, events| {
                state
                    .snapshot
                    .set_status(kind.step_label(index, base, value), events);
                state
                    .snapshot
                    .push_point(kind, SequencePoint::new(index, value), events);
            })?;
            last = value;
            debug!(run, stage = %kind, step = index, value, "Step computed");
        }

        self.guarded(token, |state, events| {
            state
                .snapshot
                .set_result(kind, Some(kind.result_label(last)), events);
        })
    }
}

impl Default for GrowthEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::RecordingObserver;

    const WAIT: Option<Duration> = Some(Duration::from_secs(10));

    fn immediate_engine(base: f64, exponent: i32) -> GrowthEngine {
        GrowthEngine::with_config(
            EngineOptions::immediate(),
            CalculationConfig::new(base, exponent),
        )
    }

    fn slow_engine(exponent: i32) -> GrowthEngine {
        GrowthEngine::with_config(
            EngineOptions {
                step_delay: Duration::from_secs(30),
            },
            CalculationConfig::new(2.0, exponent),
        )
    }

    fn wait_for_points(engine: &GrowthEngine, kind: SequenceKind, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while engine.points(kind).len() < count && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(engine.points(kind).len(), count);
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = GrowthEngine::default();
        assert!(!engine.is_running());
        assert_eq!(engine.phase(), RunPhase::Idle);
        assert!((engine.base() - 2.0).abs() < f64::EPSILON);
        assert_eq!(engine.exponent(), 5);
        assert!(engine.status_label().is_empty());
        assert!(engine.wait(Some(Duration::ZERO)));
    }

    #[test]
    fn default_scenario_completes() {
        let engine = immediate_engine(2.0, 5);
        engine.start();
        assert!(engine.wait(WAIT));

        let snap = engine.snapshot();
        assert_eq!(snap.phase, RunPhase::Completed);
        assert!(!snap.is_running);
        let linear: Vec<f64> = snap.linear_points.iter().map(|p| p.value).collect();
        let exponential: Vec<f64> = snap.exponential_points.iter().map(|p| p.value).collect();
        assert_eq!(linear, vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(exponential, vec![2.0, 4.0, 8.0, 16.0, 32.0]);
        assert_eq!(snap.linear_result_label.as_deref(), Some("Final Result: 10.00"));
        assert_eq!(
            snap.exponential_result_label.as_deref(),
            Some("Final Result: 32.00")
        );
        assert_eq!(snap.status_label, "Calculation Complete!");
    }

    #[test]
    fn finished_fires_once_after_running_cleared() {
        let engine = immediate_engine(2.0, 3);
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(recorder.clone());
        engine.start();
        assert!(engine.wait(WAIT));

        let events = recorder.events();
        assert_eq!(recorder.finished_count(), 1);
        assert!(events.last().is_some_and(EngineEvent::is_finished));
        let running_false = events
            .iter()
            .rposition(|e| *e == EngineEvent::RunningChanged { running: false })
            .unwrap();
        assert_eq!(running_false, events.len() - 2);
    }

    #[test]
    fn rejection_produces_no_points() {
        let engine = immediate_engine(2.0, 0);
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(recorder.clone());
        engine.start();
        assert!(engine.wait(WAIT));

        let snap = engine.snapshot();
        assert_eq!(snap.phase, RunPhase::Rejected);
        assert!(!snap.is_running);
        assert!(snap.linear_points.is_empty());
        assert!(snap.exponential_points.is_empty());
        assert_eq!(snap.status_label, "Exponent must be at least 1");
        assert_eq!(snap.linear_result_label, None);
        assert_eq!(snap.exponential_result_label, None);
        assert_eq!(recorder.finished_count(), 0);
    }

    #[test]
    fn repeated_rejection_is_deterministic() {
        let engine = immediate_engine(2.0, -2);
        for _ in 0..3 {
            engine.start();
            assert!(engine.wait(WAIT));
            assert_eq!(engine.status_label(), "Exponent must be at least 1");
            assert_eq!(engine.phase(), RunPhase::Rejected);
        }
    }

    #[test]
    fn start_while_running_is_ignored() {
        let engine = slow_engine(3);
        engine.start();
        // Once the first point is out the worker sits in its step delay.
        wait_for_points(&engine, SequenceKind::Linear, 1);
        let before = engine.snapshot();
        assert!(before.is_running);

        engine.start();
        assert_eq!(engine.snapshot(), before);

        engine.stop();
        assert!(engine.wait(WAIT));
    }

    #[test]
    fn stop_interrupts_delay() {
        let engine = slow_engine(4);
        engine.start();
        wait_for_points(&engine, SequenceKind::Linear, 1);

        let started = Instant::now();
        engine.stop();
        assert!(!engine.is_running());
        assert!(engine.wait(WAIT));
        assert!(started.elapsed() < Duration::from_secs(10));

        let snap = engine.snapshot();
        assert_eq!(snap.phase, RunPhase::Cancelled);
        assert_eq!(snap.linear_points.len(), 1);
        assert!(snap.exponential_points.is_empty());
        assert_eq!(snap.linear_result_label, None);
    }

    #[test]
    fn stop_when_idle_still_notifies() {
        let engine = GrowthEngine::default();
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(recorder.clone());
        engine.stop();
        assert_eq!(
            recorder.events(),
            vec![EngineEvent::RunningChanged { running: false }]
        );
        assert_eq!(engine.phase(), RunPhase::Idle);
    }

    #[test]
    fn setters_notify_only_on_change() {
        let engine = GrowthEngine::default();
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(recorder.clone());
        engine.set_base(2.0);
        engine.set_exponent(5);
        assert!(recorder.events().is_empty());

        engine.configure(3.0, 8);
        assert_eq!(
            recorder.events(),
            vec![
                EngineEvent::BaseChanged { base: 3.0 },
                EngineEvent::ExponentChanged { exponent: 8 },
            ]
        );
    }

    #[test]
    fn restart_clears_previous_results() {
        let engine = immediate_engine(2.0, 2);
        engine.start();
        assert!(engine.wait(WAIT));
        assert!(engine.result_label(SequenceKind::Linear).is_some());

        engine.set_exponent(0);
        engine.start();
        assert!(engine.wait(WAIT));
        assert_eq!(engine.result_label(SequenceKind::Linear), None);
        assert_eq!(engine.result_label(SequenceKind::Exponential), None);
        assert_eq!(engine.snapshot().run, 2);
    }

    #[test]
    fn config_captured_at_start() {
        struct Reconfigure(GrowthEngine);
        impl EngineObserver for Reconfigure {
            fn on_event(&self, event: &EngineEvent) {
                if let EngineEvent::PointAppended { point, .. } = event {
                    if point.index == 1 {
                        self.0.set_base(100.0);
                    }
                }
            }
        }

        let engine = immediate_engine(2.0, 3);
        engine.register(Arc::new(Reconfigure(engine.clone())));
        engine.start();
        assert!(engine.wait(WAIT));
        let values: Vec<f64> = engine
            .points(SequenceKind::Linear)
            .iter()
            .map(|p| p.value)
            .collect();
        assert_eq!(values, vec![2.0, 4.0, 6.0]);
        assert!((engine.base() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wait_with_unrepresentable_timeout() {
        let engine = GrowthEngine::default();
        assert!(engine.wait(Some(Duration::MAX)));

        let engine = immediate_engine(2.0, 3);
        engine.start();
        assert!(engine.wait(Some(Duration::MAX)));
        assert_eq!(engine.phase(), RunPhase::Completed);
    }

    /// Last point list an observer can rebuild from the events it saw.
    fn replay_points(events: &[EngineEvent], kind: SequenceKind) -> Vec<SequencePoint> {
        let mut points = Vec::new();
        for event in events {
            match event {
                EngineEvent::PointsCleared { kind: k } if *k == kind => points.clear(),
                EngineEvent::PointAppended { kind: k, point } if *k == kind => points.push(*point),
                _ => {}
            }
        }
        points
    }

    #[test]
    fn stopped_run_cannot_notify_after_restart() {
        use std::sync::atomic::{AtomicBool, Ordering};

        /// Holds up delivery of the first run's first point.
        struct SlowFirstPoint {
            entered: AtomicBool,
        }
        impl EngineObserver for SlowFirstPoint {
            fn on_event(&self, event: &EngineEvent) {
                if let EngineEvent::PointAppended { point, .. } = event {
                    if point.index == 1
                        && (point.value - 2.0).abs() < f64::EPSILON
                        && !self.entered.swap(true, Ordering::SeqCst)
                    {
                        thread::sleep(Duration::from_millis(300));
                    }
                }
            }
        }

        let engine = slow_engine(3);
        let slow = Arc::new(SlowFirstPoint {
            entered: AtomicBool::new(false),
        });
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(slow.clone());
        engine.register(recorder.clone());

        engine.start();
        let deadline = Instant::now() + Duration::from_secs(10);
        while !slow.entered.load(Ordering::SeqCst) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(slow.entered.load(Ordering::SeqCst));

        // The first worker is still delivering its point.
        engine.stop();
        engine.set_base(7.0);
        engine.start();
        wait_for_points(&engine, SequenceKind::Linear, 1);
        engine.stop();
        assert!(engine.wait(WAIT));

        let current = engine.points(SequenceKind::Linear);
        assert_eq!(current, vec![SequencePoint::new(1, 7.0)]);
        assert_eq!(replay_points(&recorder.events(), SequenceKind::Linear), current);

        let last_linear = recorder.events().into_iter().rev().find(|e| {
            matches!(e, EngineEvent::PointAppended { kind: SequenceKind::Linear, .. })
        });
        assert_eq!(
            last_linear,
            Some(EngineEvent::PointAppended {
                kind: SequenceKind::Linear,
                point: SequencePoint::new(1, 7.0),
            })
        );
    }

    #[test]
    fn events_replay_to_engine_state() {
        let engine = immediate_engine(1.5, 6);
        let recorder = Arc::new(RecordingObserver::new());
        engine.register(recorder.clone());
        for _ in 0..3 {
            engine.start();
            assert!(engine.wait(WAIT));
        }
        let events = recorder.events();
        for kind in SequenceKind::ALL {
            assert_eq!(replay_points(&events, kind), engine.points(kind));
        }
    }
}
