//! The `wormsim` binary.
//!
//! Wires the simulation core to a crossterm terminal display. It loads
//! configuration, initializes logging, sizes the board to the terminal,
//! and plays runs until the operator quits.
//!
//! # Startup Sequence
//!
//! 1. Parse the command line (`wormsim [digit] [--headless]`)
//! 2. Load configuration from `wormsim-config.yaml`
//! 3. Initialize structured logging to the configured file
//! 4. Size the board and create the arena
//! 5. Run the session on the terminal, or headless
//! 6. Log the result

mod error;
mod keys;
mod pacer;
mod terminal;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wormsim_core::config::{DEFAULT_CONFIG_FILE, LoggingConfig, PacingConfig};
use wormsim_core::{HeadlessStrategy, SessionSummary, SimulationConfig, run_session};
use wormsim_world::Arena;

use crate::error::EngineError;
use crate::pacer::Pacer;
use crate::terminal::TerminalStrategy;

/// Steps in the single run of a headless session.
const HEADLESS_STEPS: u64 = 1_000;

/// What the command line asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CliArgs {
    /// Initial slowness from a leading digit, overriding configuration.
    slowness_ms: Option<u64>,
    /// Run without a terminal display.
    headless: bool,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if startup or the session itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = SimulationConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;

    init_logging(&config.logging)?;
    info!(
        headless = args.headless,
        seed = ?config.board.seed,
        slowness_ms = config.pacing.slowness_ms,
        cli_slowness_ms = ?args.slowness_ms,
        min_worms = config.population.min_worms,
        worm_variation = config.population.worm_variation,
        "wormsim starting"
    );

    let session = if args.headless {
        run_headless(&config)?
    } else {
        run_terminal(&config, args.slowness_ms)?
    };

    info!(
        runs = session.runs,
        total_steps = session.total_steps,
        "wormsim finished"
    );
    Ok(())
}

/// Play on the terminal until the operator quits.
fn run_terminal(
    config: &SimulationConfig,
    cli_slowness_ms: Option<u64>,
) -> Result<SessionSummary, EngineError> {
    let pacer = initial_pacer(&config.pacing, cli_slowness_ms);
    let mut strategy = TerminalStrategy::enter(pacer)?;
    let (width, height) = terminal::available_area()?;
    let size = config.board.board_size(width, height);
    info!(width = size.width, height = size.height, "board sized to terminal");

    let mut arena = Arena::new(size, config.board.seed);
    Ok(run_session(&mut arena, &mut strategy, config.population.population())?)
}

/// One fixed-length run with no display, summarized as YAML on stdout.
fn run_headless(config: &SimulationConfig) -> Result<SessionSummary, EngineError> {
    let size = config
        .board
        .board_size(config.board.max_width, config.board.max_height);
    let mut arena = Arena::new(size, config.board.seed);
    let mut strategy = HeadlessStrategy::new(HEADLESS_STEPS, 1);

    let session = run_session(&mut arena, &mut strategy, config.population.population())?;
    print!("{}", serde_yml::to_string(&session)?);
    Ok(session)
}

/// Pacer from configuration, with a command-line slowness taking over.
fn initial_pacer(pacing: &PacingConfig, cli_slowness_ms: Option<u64>) -> Pacer {
    let mut pacer = Pacer::new(pacing);
    if let Some(slowness_ms) = cli_slowness_ms {
        pacer.set_slowness(slowness_ms);
    }
    pacer
}

fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let file = File::create(&logging.file).map_err(|source| EngineError::LogFile {
        path: logging.file.clone(),
        source,
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| EngineError::Logging {
            message: e.to_string(),
        })
}

/// Parse everything after the program name.
///
/// A leading digit `d` sets the initial slowness to `10 * d` ms.
fn parse_args<I>(args: I) -> Result<CliArgs, EngineError>
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    for arg in args {
        if arg == "--headless" {
            cli.headless = true;
            continue;
        }
        match arg.chars().next().and_then(|c| c.to_digit(10)) {
            Some(digit) if cli.slowness_ms.is_none() => {
                cli.slowness_ms = Some(u64::from(digit).saturating_mul(10));
            }
            _ => {
                return Err(EngineError::Usage {
                    message: format!("unexpected argument `{arg}`"),
                });
            }
        }
    }
    Ok(cli)
}
