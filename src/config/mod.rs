//! Run configuration built from positional command-line values
//!
//! The number of values selects the mode:
//!
//! - 8 values: `days timestep central_mass moving_mass x y vx vy` (force integration)
//! - 5 values: `days timestep central_mass periapsis apoapsis` (Kepler's equation)
//!
//! Both modes run `floor(days * 86400 / timestep)` iterations, at most
//! [`MAX_ITERATIONS`]. Force mode uses the semi-implicit Euler scheme unless
//! another [`IntegrationScheme`] is chosen with [`SimulationConfig::with_scheme`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DAY_S, MAX_ITERATIONS};
use crate::integrator::{IntegrationScheme, TwoBodySimulation};
use crate::kepler::{KeplerSolver, OrbitParameters};
use crate::vector::Vec2;
use crate::{Propagator, Result};

/// Error type for run configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(
        "Expected {} values (force integration) or {} values (Kepler's equation), got {0}",
        SimulationConfig::FORCE_ARGUMENTS,
        SimulationConfig::ANALYTIC_ARGUMENTS
    )]
    ArgumentCount(usize),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Run needs {requested} iterations, more than the limit of {limit}")]
    TooManyIterations { requested: f64, limit: usize },

    #[error("The {0} scheme applies to force integration only")]
    SchemeRequiresForceMode(IntegrationScheme),
}

/// Inputs of a force-integration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceConfig {
    /// Mass of the fixed central body (kg)
    pub central_mass: f64,
    /// Mass of the moving body (kg)
    pub moving_mass: f64,
    /// Initial position of the moving body (m)
    pub initial_position: [f64; 2],
    /// Initial velocity of the moving body (m/s)
    pub initial_velocity: [f64; 2],
    /// Update rule of the integrator
    #[serde(default)]
    pub scheme: IntegrationScheme,
}

/// Simulation method and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    Force(ForceConfig),
    Analytic(OrbitParameters),
}

/// A complete, validated run configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulated duration in days
    pub days: f64,
    /// Step between samples in seconds
    pub timestep: f64,
    /// Number of iterations (force mode) or samples (analytical mode)
    pub iterations: usize,
    pub mode: Mode,
}

impl SimulationConfig {
    pub const FORCE_ARGUMENTS: usize = 8;
    pub const ANALYTIC_ARGUMENTS: usize = 5;

    /// Build a configuration from unparsed positional arguments
    ///
    /// The count is checked before any value is parsed.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> std::result::Result<Self, ConfigError> {
        if args.len() != Self::FORCE_ARGUMENTS && args.len() != Self::ANALYTIC_ARGUMENTS {
            return Err(ConfigError::ArgumentCount(args.len()));
        }
        let values = args
            .iter()
            .map(|arg| {
                let arg = arg.as_ref();
                arg.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::NotANumber(arg.to_string()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_positional(&values)
    }

    /// Build a configuration from positional values, choosing the mode by count
    pub fn from_positional(values: &[f64]) -> std::result::Result<Self, ConfigError> {
        let mode_arguments = values.len();
        if mode_arguments != Self::FORCE_ARGUMENTS && mode_arguments != Self::ANALYTIC_ARGUMENTS {
            return Err(ConfigError::ArgumentCount(mode_arguments));
        }

        let days = values[0];
        let timestep = values[1];
        let iterations = iteration_count(days, timestep)?;
        let central_mass = positive("central mass", values[2])?;

        let mode = match values {
            &[_, _, _, moving_mass, x, y, vx, vy] => Mode::Force(ForceConfig {
                central_mass,
                moving_mass: positive("moving mass", moving_mass)?,
                initial_position: [finite("initial x", x)?, finite("initial y", y)?],
                initial_velocity: [finite("initial vx", vx)?, finite("initial vy", vy)?],
                scheme: IntegrationScheme::default(),
            }),
            &[_, _, _, periapsis, apoapsis] => Mode::Analytic(OrbitParameters {
                periapsis: positive("periapsis", periapsis)?,
                apoapsis: positive("apoapsis", apoapsis)?,
                central_mass,
                timestep,
                sample_count: iterations,
            }),
            _ => return Err(ConfigError::ArgumentCount(mode_arguments)),
        };

        Ok(Self {
            days,
            timestep,
            iterations,
            mode,
        })
    }

    /// Choose the integration scheme of a force-mode run
    pub fn with_scheme(mut self, scheme: IntegrationScheme) -> std::result::Result<Self, ConfigError> {
        match &mut self.mode {
            Mode::Force(force) => force.scheme = scheme,
            Mode::Analytic(_) => return Err(ConfigError::SchemeRequiresForceMode(scheme)),
        }
        Ok(self)
    }

    /// Short mode label
    pub fn mode_name(&self) -> &'static str {
        match self.mode {
            Mode::Force(_) => "force",
            Mode::Analytic(_) => "analytic",
        }
    }

    /// Build the propagator for the configured mode
    pub fn propagator(&self) -> Result<Box<dyn Propagator>> {
        let propagator: Box<dyn Propagator> = match self.mode {
            Mode::Force(force) => {
                let [x, y] = force.initial_position;
                let [vx, vy] = force.initial_velocity;
                Box::new(TwoBodySimulation::around_origin(
                    force.central_mass,
                    force.moving_mass,
                    Vec2::new(x, y),
                    Vec2::new(vx, vy),
                    self.timestep,
                    self.iterations,
                )?
                .with_scheme(force.scheme))
            }
            Mode::Analytic(params) => Box::new(KeplerSolver::new(params)?),
        };
        Ok(propagator)
    }
}

/// Number of steps covering `days` at `timestep` seconds per step
pub fn iteration_count(days: f64, timestep: f64) -> std::result::Result<usize, ConfigError> {
    let days = finite("days", days)?;
    if days < 0.0 {
        return Err(ConfigError::InvalidValue {
            name: "days",
            value: days,
        });
    }
    let timestep = positive("timestep", timestep)?;
    let steps = (days * DAY_S / timestep).floor();
    if steps > MAX_ITERATIONS as f64 {
        return Err(ConfigError::TooManyIterations {
            requested: steps,
            limit: MAX_ITERATIONS,
        });
    }
    Ok(steps as usize)
}

fn finite(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> std::result::Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}
