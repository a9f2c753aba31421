//! Run progress and cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use crate::error::GrowthError;

/// How far a run has advanced, counted in points across both sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunProgress {
    /// Points produced so far in this run.
    pub completed_steps: u64,
    /// Points a complete run produces (twice the exponent).
    pub total_steps: u64,
}

impl RunProgress {
    /// Progress of a run with the given exponent and point counts.
    #[must_use]
    pub fn new(exponent: i32, linear_points: usize, exponential_points: usize) -> Self {
        let per_stage = u64::try_from(exponent.max(0)).unwrap_or(0);
        Self {
            completed_steps: (linear_points + exponential_points) as u64,
            total_steps: per_stage * 2,
        }
    }

    /// Progress as a fraction in [0.0, 1.0].
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        (self.completed_steps as f64 / self.total_steps as f64).clamp(0.0, 1.0)
    }
}

struct TokenInner {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    wake: Condvar,
}

/// Cooperative cancellation token.
///
/// Checked by the engine at every step boundary. [`sleep`](Self::sleep)
/// returns early when the token is cancelled, so the step delay never
/// holds up a stop request.
///
/// # Example
/// ```
/// use growthcalc_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<TokenInner>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(TokenInner {
                cancelled: AtomicBool::new(false),
                lock: Mutex::new(()),
                wake: Condvar::new(),
            }),
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation and wake any sleeping holder.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        let _guard = self.inner.lock.lock();
        self.inner.wake.notify_all();
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), GrowthError> {
        if self.is_cancelled() {
            Err(GrowthError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Wait for `duration`, or until the token is cancelled.
    ///
    /// Returns `Err(GrowthError::Cancelled)` if the token is cancelled
    /// before or during the wait.
    pub fn sleep(&self, duration: Duration) -> Result<(), GrowthError> {
        if duration.is_zero() {
            return self.check_cancelled();
        }
        let deadline = Instant::now() + duration;
        let mut guard = self.inner.lock.lock();
        while !self.is_cancelled() {
            if self.inner.wake.wait_until(&mut guard, deadline).timed_out() {
                break;
            }
        }
        drop(guard);
        self.check_cancelled()
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
