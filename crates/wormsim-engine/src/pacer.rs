//! Step pacing for the terminal display.
//!
//! Between two steps the display waits `slowness + 1` milliseconds,
//! polling for keys every `quantum`. While paused the wait does not
//! progress, so the board stays frozen until the operator resumes.

use std::time::Duration;

use wormsim_core::config::PacingConfig;

/// Current speed settings and pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    slowness_ms: u64,
    quantum_ms: u64,
    step_ms: u64,
    paused: bool,
}

impl Pacer {
    /// Pacer starting from the configured settings. A zero quantum is
    /// raised to one millisecond so waits always make progress.
    pub fn new(pacing: &PacingConfig) -> Self {
        Self {
            slowness_ms: pacing.slowness_ms,
            quantum_ms: pacing.delay_quantum_ms.max(1),
            step_ms: pacing.slowness_step_ms,
            paused: false,
        }
    }

    /// Extra delay between steps, in milliseconds.
    pub const fn slowness_ms(&self) -> u64 {
        self.slowness_ms
    }

    /// Whether the run is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replace the slowness.
    pub const fn set_slowness(&mut self, slowness_ms: u64) {
        self.slowness_ms = slowness_ms;
    }

    /// Reduce the slowness by one step, stopping at zero.
    pub const fn faster(&mut self) {
        self.slowness_ms = self.slowness_ms.saturating_sub(self.step_ms);
    }

    /// Increase the slowness by one step.
    pub const fn slower(&mut self) {
        self.slowness_ms = self.slowness_ms.saturating_add(self.step_ms);
    }

    /// Drop the slowness to zero.
    pub const fn full_speed(&mut self) {
        self.slowness_ms = 0;
    }

    /// Pause if running, resume if paused.
    pub const fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// How long to wait for a key in one polling slice.
    pub const fn quantum(&self) -> Duration {
        Duration::from_millis(self.quantum_ms)
    }

    /// Milliseconds to wait before the next step.
    pub const fn step_budget_ms(&self) -> u64 {
        self.slowness_ms.saturating_add(1)
    }

    /// What is left of `remaining_ms` after one polling slice.
    pub const fn after_quantum(&self, remaining_ms: u64) -> u64 {
        if self.paused {
            remaining_ms
        } else {
            remaining_ms.saturating_sub(self.quantum_ms)
        }
    }
}
