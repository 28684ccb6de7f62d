//! Configuration, presentation contract, and run loop for the worms
//! simulation.
//!
//! # Modules
//!
//! - [`config`] -- Typed configuration loaded from `wormsim-config.yaml`
//!   with environment overrides.
//! - [`strategy`] -- The [`DisplayStrategy`] contract between the core and
//!   whatever draws the board and reads keys, plus [`HeadlessStrategy`].
//! - [`runner`] -- [`run_step`], [`run_simulation`], and [`run_session`].

pub mod config;
pub mod runner;
pub mod strategy;

pub use config::{ConfigError, SimulationConfig};
pub use runner::{RunSummary, RunnerError, SessionSummary, run_session, run_simulation, run_step};
pub use strategy::{DisplayStrategy, HeadlessStrategy, StrategyError};
