//! Orbitsim: two-body orbit simulation
//!
//! This crate computes the trajectory of a body orbiting a much heavier fixed
//! body, either by stepping the Newtonian attraction force forward in time
//! ([`integrator`]) or analytically from the orbit's periapsis and apoapsis by
//! solving Kepler's equation ([`kepler`]). Both produce a series of 2D
//! positions which [`output`] writes as a flat `x;y` log.

use thiserror::Error;

pub mod celestial;
pub mod config;
pub mod constants;
pub mod integrator;
pub mod kepler;
pub mod output;
pub mod vector;

// Re-export commonly used types
pub use celestial::{CelestialBody, KinematicRecord, KinematicState, RecordError};
pub use config::{ConfigError, Mode, SimulationConfig};
pub use integrator::{GravityIntegrator, IntegrationScheme, TwoBodySimulation};
pub use kepler::{KeplerError, KeplerSolver, OrbitParameters};
pub use output::{FlatLogWriter, PositionSink};
pub use vector::{Vec2, Vec3, Vector, VectorError};

/// Main error type for the orbitsim library
#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Kepler error: {0}")]
    Kepler(#[from] KeplerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid mass for {name}: {mass} (must be positive and finite)")]
    InvalidMass { name: String, mass: f64 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for orbitsim operations
pub type Result<T> = std::result::Result<T, OrbitError>;

/// Anything that can produce the position series of an orbiting body
pub trait Propagator {
    /// Short name of the method, used in logs
    fn method(&self) -> &'static str;

    /// Run the configured number of steps and return every position, oldest first
    fn propagate(&mut self) -> Result<Vec<Vec2<f64>>>;
}
