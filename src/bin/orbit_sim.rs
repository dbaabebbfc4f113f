//! Two-body orbit simulator
//!
//! Computes the trajectory of a body around a fixed central mass and writes
//! every position to a flat `x;y` log. The number of positional values picks
//! the method:
//!
//! - 8 values, force integration:
//!   `days timestep central_mass moving_mass x y vx vy`
//! - 5 values, Kepler's equation:
//!   `days timestep central_mass periapsis apoapsis`
//!
//! Force integration uses the semi-implicit Euler scheme by default;
//! `--method rk4` selects fourth-order Runge-Kutta instead.
//!
//! Values are parsed after the log is opened, so a wrong count, a value that
//! is not a number, or a run that fails part way leaves the placeholder line
//! in the log.
//!
//! Usage:
//!   cargo run --bin orbit_sim -- 2000 100 1.9891e30 5.9722e24 75e9 0 0 57000
//!   cargo run --bin orbit_sim -- --method rk4 2000 100 1.9891e30 5.9722e24 75e9 0 0 57000
//!   cargo run --bin orbit_sim -- --summary 365 86400 2e30 1e11 1.5e11

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Parser, ValueEnum};
use log::{error, info};
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use orbitsim::constants::{DEFAULT_OUTPUT_PATH, OUTPUT_PLACEHOLDER};
use orbitsim::{FlatLogWriter, IntegrationScheme, OrbitError, PositionSink, SimulationConfig};

/// Type alias for the error type used throughout this binary
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Integration scheme for force mode
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Method {
    /// Semi-implicit Euler (one force evaluation per step)
    Euler,
    /// Fourth-order Runge-Kutta (four force evaluations per step)
    Rk4,
}

impl From<Method> for IntegrationScheme {
    fn from(method: Method) -> Self {
        match method {
            Method::Euler => IntegrationScheme::SemiImplicitEuler,
            Method::Rk4 => IntegrationScheme::RungeKutta4,
        }
    }
}

/// Two-body orbit simulator
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Simulates a body orbiting a fixed central mass and logs its positions",
    long_about = None
)]
struct Args {
    /// Position log to write (truncated if present)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print a JSON run summary on stdout
    #[arg(short, long, action = ArgAction::SetTrue)]
    summary: bool,

    /// Integration scheme (force integration only)
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Simulation values: 8 for force integration, 5 for Kepler's equation
    #[arg(num_args = 0.., allow_negative_numbers = true)]
    values: Vec<String>,
}

/// Machine-readable description of a finished run
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    finished_at: String,
    method: &'static str,
    output: &'a str,
    samples: usize,
    elapsed_ms: f64,
    config: &'a SimulationConfig,
}

fn run(args: &Args) -> Result<()> {
    // The log exists even when the run cannot start
    let mut writer = FlatLogWriter::create(&args.output)?;

    let prepared = SimulationConfig::from_args(&args.values)
        .and_then(|config| match args.method {
            Some(method) => config.with_scheme(method.into()),
            None => Ok(config),
        })
        .map_err(OrbitError::from)
        .and_then(|config| Ok((config, config.propagator()?)));
    let (config, mut propagator) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            writer.write_placeholder(OUTPUT_PLACEHOLDER)?;
            writer.finish()?;
            return Err(e.into());
        }
    };

    info!(
        "Running {} over {} days ({} iterations of {} s)",
        propagator.method(),
        config.days,
        config.iterations,
        config.timestep
    );

    let start = Instant::now();
    let positions = match propagator.propagate() {
        Ok(positions) => positions,
        Err(e) => {
            writer.write_placeholder(OUTPUT_PLACEHOLDER)?;
            writer.finish()?;
            return Err(e.into());
        }
    };
    let samples = writer.write_positions(&positions)?;
    writer.finish()?;
    let elapsed = start.elapsed();

    info!(
        "Wrote {} positions to {} in {:.2?}",
        samples,
        args.output.display(),
        elapsed
    );

    if args.summary {
        let output = args.output.to_string_lossy();
        let summary = RunSummary {
            finished_at: chrono::Utc::now().to_rfc3339(),
            method: propagator.method(),
            output: &output,
            samples,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            config: &config,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    // Ignore failure: a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
