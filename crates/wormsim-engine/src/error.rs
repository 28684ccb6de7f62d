//! Error types for the `wormsim` binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and play.

use std::path::PathBuf;

/// Top-level error for the `wormsim` binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wormsim_core::ConfigError,
    },

    /// The run loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: wormsim_core::RunnerError,
    },

    /// Setting up or restoring the terminal failed.
    #[error("terminal error: {source}")]
    Terminal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The log file could not be created.
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// Path of the log file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },

    /// The session summary could not be serialized.
    #[error("summary error: {source}")]
    Summary {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// The command line was not understood.
    #[error("usage: wormsim [digit] [--headless] ({message})")]
    Usage {
        /// What was wrong with the arguments.
        message: String,
    },
}
