use crate::utils::Float;
use std::time::{Duration, Instant};

/// Implements performance timer functionality.
#[derive(Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns elapsed time in seconds.
    pub fn elapsed_secs(&self) -> u64 {
        (Instant::now() - self.start).as_secs()
    }

    /// Returns elapsed time in seconds as a floating point number.
    pub fn elapsed_secs_as_float(&self) -> Float {
        (Instant::now() - self.start).as_secs_f64() as Float
    }

    /// Returns elapsed time in milliseconds.
    pub fn elapsed_millis(&self) -> u128 {
        (Instant::now() - self.start).as_millis()
    }

    /// Runs the action and returns its result together with the time it took.
    pub fn measure_duration<R, F: FnOnce() -> R>(action: F) -> (R, Duration) {
        let start = Timer::start();
        let result = action();

        (result, Instant::now() - start.start)
    }
}
