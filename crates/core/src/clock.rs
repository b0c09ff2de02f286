//! Monotonic frame clock.

use serde::Serialize;

/// A tick counter plus a continuous time value.
///
/// `advance` only ever moves the clock forward: negative or non-finite steps
/// still count a tick but leave `time` where it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FrameClock {
    ticks: u64,
    time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one tick and adds `step` to the continuous time.
    pub fn advance(&mut self, step: f64) {
        self.ticks = self.ticks.saturating_add(1);
        if step.is_finite() && step > 0.0 {
            self.time += step;
        }
    }

    /// Number of completed `advance` calls.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Accumulated continuous time (or angle).
    pub fn time(&self) -> f64 {
        self.time
    }
}
