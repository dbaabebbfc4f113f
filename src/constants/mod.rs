//! Constants module for orbit calculations

use std::f64::consts::PI;

// Physics
/// Gravitational constant in m^3 kg^-1 s^-2
pub const G: f64 = 6.67e-11;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;

// Angles
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Kepler's equation solver
/// Convergence tolerance on successive eccentric anomaly estimates (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-5;
/// Iteration cap for the eccentric anomaly solver
pub const KEPLER_MAX_ITERATIONS: usize = 1000;
/// Eccentricity above which an orbit is treated as near-parabolic
pub const NEAR_PARABOLIC_ECCENTRICITY: f64 = 0.99;

// Run limits
/// Largest number of iterations (or samples) a single run may request
pub const MAX_ITERATIONS: usize = 10_000_000;

// Output
/// Default position log written by the simulator
pub const DEFAULT_OUTPUT_PATH: &str = "simulation_data.log";
/// Line written to the position log when a run cannot start
pub const OUTPUT_PLACEHOLDER: &str = "Error - Not enough data";
