//! Frame clocks

use std::time::Instant;

/// Source of elapsed time between ticks
pub trait Clock {
    /// Milliseconds since the previous call
    fn elapsed_ms(&mut self) -> f32;
}

/// Wall-clock time
pub struct SystemClock {
    last: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f32() * 1000.0
    }
}

/// Reports the same step every tick, for headless runs and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step_ms: f32,
}

impl FixedClock {
    pub fn new(step_ms: f32) -> Self {
        Self { step_ms }
    }
}

impl Clock for FixedClock {
    fn elapsed_ms(&mut self) -> f32 {
        self.step_ms
    }
}
