//! The contract between the simulation core and its presentation.
//!
//! The core never draws and never reads keys itself. After each step it
//! asks a [`DisplayStrategy`] to redraw the board and to process input,
//! and after each run it asks whether to quit. A terminal implementation
//! lives in the `wormsim` binary; [`HeadlessStrategy`] runs without any
//! display at all.

use wormsim_world::Arena;

/// Errors a presentation layer can report back to the run loop.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// Terminal or other device I/O failed.
    #[error("display I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// How the board is shown and how the operator steers a run.
pub trait DisplayStrategy {
    /// Draw the current screen grid. The arena is read-only here.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] if the display cannot be written.
    fn redraw(&mut self, arena: &Arena) -> Result<(), StrategyError>;

    /// Handle pending input, pace the run, and report whether the current
    /// run should stop.
    ///
    /// May add or kill worms through the arena's operator actions.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] if input cannot be read.
    fn process_input(&mut self, arena: &mut Arena) -> Result<bool, StrategyError>;

    /// Asked once after each run. `true` ends the session, `false` starts
    /// another run.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] if the prompt cannot be shown or answered.
    fn confirm_exit(&mut self, arena: &Arena) -> Result<bool, StrategyError>;
}

/// A strategy with no display that stops each run after a fixed number
/// of steps and ends the session after a fixed number of runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessStrategy {
    steps_per_run: u64,
    runs: u32,
    steps_this_run: u64,
    runs_finished: u32,
    redraws: u64,
}

impl HeadlessStrategy {
    /// Stop each run after `steps_per_run` steps and quit after `runs`
    /// runs. Both are raised to at least 1.
    pub fn new(steps_per_run: u64, runs: u32) -> Self {
        Self {
            steps_per_run: steps_per_run.max(1),
            runs: runs.max(1),
            steps_this_run: 0,
            runs_finished: 0,
            redraws: 0,
        }
    }

    /// Total redraw requests received.
    pub const fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Runs that have finished so far.
    pub const fn runs_finished(&self) -> u32 {
        self.runs_finished
    }
}

impl DisplayStrategy for HeadlessStrategy {
    fn redraw(&mut self, _arena: &Arena) -> Result<(), StrategyError> {
        self.redraws = self.redraws.saturating_add(1);
        Ok(())
    }

    fn process_input(&mut self, _arena: &mut Arena) -> Result<bool, StrategyError> {
        self.steps_this_run = self.steps_this_run.saturating_add(1);
        Ok(self.steps_this_run >= self.steps_per_run)
    }

    fn confirm_exit(&mut self, _arena: &Arena) -> Result<bool, StrategyError> {
        self.steps_this_run = 0;
        self.runs_finished = self.runs_finished.saturating_add(1);
        Ok(self.runs_finished >= self.runs)
    }
}
