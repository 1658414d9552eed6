//! Time provider abstraction so run timings can be made deterministic

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Source of monotonic time for measuring test and run durations
pub trait TimeProvider: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production time provider backed by `Instant::now()`
#[derive(Debug, Default, Clone)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock.
///
/// Time only moves when `advance` is called, or by `step` on every read when
/// constructed with `ManualClock::stepping`.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Instant>>,
    step: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::stepping(Duration::ZERO)
    }

    /// Clock that moves forward by `step` after each `now()` call
    pub fn stepping(step: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(Instant::now())),
            step,
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for ManualClock {
    fn now(&self) -> Instant {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let reading = *current;
        *current += self.step;
        reading
    }
}
