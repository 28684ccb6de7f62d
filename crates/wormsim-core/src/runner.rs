//! The simulation run loop.
//!
//! A *step* advances every living worm once and hands the new screen to the
//! display. A *run* restarts the arena and steps until the display asks to
//! stop. A *session* repeats runs until the display confirms exit.
//!
//! A stop request only ends a run after the in-progress step and redraw
//! have completed.

use serde::Serialize;
use tracing::{debug, info};
use wormsim_world::{Arena, Population, PopulationStats};

use crate::strategy::{DisplayStrategy, StrategyError};

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The display strategy failed.
    #[error("display strategy error: {source}")]
    Strategy {
        /// The underlying strategy error.
        #[from]
        source: StrategyError,
    },
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Steps executed.
    pub steps: u64,
    /// Population when the run stopped.
    pub stats: PopulationStats,
}

/// Outcome of a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Runs played.
    pub runs: u32,
    /// Steps executed across every run.
    pub total_steps: u64,
    /// Summary of the final run.
    pub last_run: Option<RunSummary>,
}

/// Advance the arena one step, redraw, and process input.
///
/// Returns `true` when the display asks to end the current run.
///
/// # Errors
///
/// Returns [`RunnerError`] if the display fails.
pub fn run_step(
    arena: &mut Arena,
    strategy: &mut dyn DisplayStrategy,
) -> Result<bool, RunnerError> {
    arena.step();
    strategy.redraw(arena)?;
    Ok(strategy.process_input(arena)?)
}

/// Restart the arena with a fresh population and step until the display
/// asks to stop.
///
/// # Errors
///
/// Returns [`RunnerError`] if the display fails.
pub fn run_simulation(
    arena: &mut Arena,
    strategy: &mut dyn DisplayStrategy,
    population: Population,
) -> Result<RunSummary, RunnerError> {
    let worms = arena.restart(population);
    info!(worms, "run starting");
    strategy.redraw(arena)?;

    let mut steps: u64 = 0;
    loop {
        let stop = run_step(arena, strategy)?;
        steps = steps.saturating_add(1);
        if stop {
            break;
        }
    }

    let summary = RunSummary {
        steps,
        stats: arena.stats(),
    };
    log_run_end(&summary);
    Ok(summary)
}

/// Play runs until the display confirms exit.
///
/// # Errors
///
/// Returns [`RunnerError`] if the display fails.
pub fn run_session(
    arena: &mut Arena,
    strategy: &mut dyn DisplayStrategy,
    population: Population,
) -> Result<SessionSummary, RunnerError> {
    let mut session = SessionSummary::default();
    loop {
        let run = run_simulation(arena, strategy, population)?;
        session.runs = session.runs.saturating_add(1);
        session.total_steps = session.total_steps.saturating_add(run.steps);
        session.last_run = Some(run);

        if strategy.confirm_exit(arena)? {
            break;
        }
        debug!(runs = session.runs, "operator asked for another run");
    }
    info!(
        runs = session.runs,
        total_steps = session.total_steps,
        "session finished"
    );
    Ok(session)
}

fn log_run_end(summary: &RunSummary) {
    info!(
        steps = summary.steps,
        vegetarians = summary.stats.vegetarians,
        scissorheads = summary.stats.scissorheads,
        cannibals = summary.stats.cannibals,
        high_water_mark = summary.stats.high_water_mark,
        "run finished"
    );
}
