//! Analytical elliptical orbits via Kepler's equation
//!
//! Given the periapsis and apoapsis distances of a body around a central mass,
//! the orbit's shape and period are fixed. For each sample time the mean
//! anomaly `M = 2π·t/T` is converted to the eccentric anomaly `ψ` by solving
//! Kepler's equation `M = ψ - e·sin(ψ)` with Newton-Raphson, then to the true
//! anomaly `φ` and radius `r`, and finally to Cartesian coordinates with the
//! central body at the origin and periapsis on the +x axis.
//!
//! The true anomaly is computed as `2·atan(|tan(ψ/2)|·sqrt((1+e)/(1-e)))`,
//! which always lies in `[0, π]`: the second half of each orbit retraces the
//! first half's positions in reverse, mirrored onto `y ≥ 0`.
//!
//! # Convergence
//!
//! Newton's method always starts from `ψ = 0` and the mean anomaly is not
//! reduced modulo 2π. For low eccentricities (up to about 0.4) every sample
//! converges. From around `e = 0.5` the iteration can cycle instead: at
//! `e = 0.5`, mean anomalies between roughly 2.96 and 3.2 rad never converge.
//! Such a sample fails with [`KeplerError::ConvergenceFailure`], and so does
//! the whole [`KeplerSolver::solve`] call, so positive radii alone do not
//! guarantee a usable orbit.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DAY_S, G, KEPLER_MAX_ITERATIONS, KEPLER_TOLERANCE, NEAR_PARABOLIC_ECCENTRICITY, TAU,
};
use crate::vector::Vec2;
use crate::{Propagator, Result};

/// Error type for analytical orbit calculations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeplerError {
    #[error(
        "Kepler's equation did not converge for mean anomaly {mean_anomaly} \
         after {iterations} iterations (last step {last_step})"
    )]
    ConvergenceFailure {
        mean_anomaly: f64,
        iterations: usize,
        last_step: f64,
    },

    #[error("Invalid orbit: {0}")]
    InvalidOrbit(String),
}

/// Inputs of an analytical orbit run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParameters {
    /// Closest distance to the central body (m)
    pub periapsis: f64,
    /// Farthest distance from the central body (m)
    pub apoapsis: f64,
    /// Mass of the central body (kg)
    pub central_mass: f64,
    /// Time between samples (s)
    pub timestep: f64,
    /// Number of samples, the first at t = 0
    pub sample_count: usize,
}

impl OrbitParameters {
    /// Create and validate orbit parameters
    pub fn new(
        periapsis: f64,
        apoapsis: f64,
        central_mass: f64,
        timestep: f64,
        sample_count: usize,
    ) -> std::result::Result<Self, KeplerError> {
        let params = Self {
            periapsis,
            apoapsis,
            central_mass,
            timestep,
            sample_count,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that radii, mass and timestep are positive and finite
    ///
    /// Positive radii guarantee `0 <= e < 1`.
    pub fn validate(&self) -> std::result::Result<(), KeplerError> {
        let checks = [
            ("periapsis", self.periapsis),
            ("apoapsis", self.apoapsis),
            ("central mass", self.central_mass),
            ("timestep", self.timestep),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(KeplerError::InvalidOrbit(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Shape and period of the orbit
    pub fn geometry(&self) -> OrbitGeometry {
        OrbitGeometry::from_extremes(self.periapsis, self.apoapsis, self.central_mass)
    }
}

/// Derived ellipse parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitGeometry {
    /// a = (r1 + r2) / 2
    pub semi_major_axis: f64,
    /// e = |r1 - r2| / (r1 + r2)
    pub eccentricity: f64,
    /// c = e·a, distance from center to focus
    pub focal_distance: f64,
    /// b = sqrt(a² - c²)
    pub semi_minor_axis: f64,
    /// p = b² / a
    pub semi_latus_rectum: f64,
    /// T = 2π·sqrt(a³ / (G·M)), in seconds
    pub period: f64,
}

impl OrbitGeometry {
    /// Derive the ellipse from its extreme distances and the central mass
    pub fn from_extremes(periapsis: f64, apoapsis: f64, central_mass: f64) -> Self {
        let a = (periapsis + apoapsis) / 2.0;
        let e = (periapsis - apoapsis).abs() / (periapsis + apoapsis);
        let c = e * a;
        let b = (a * a - c * c).sqrt();
        let p = b * b / a;
        let period = TAU * (a.powi(3) / (G * central_mass)).sqrt();

        Self {
            semi_major_axis: a,
            eccentricity: e,
            focal_distance: c,
            semi_minor_axis: b,
            semi_latus_rectum: p,
            period,
        }
    }

    /// Mean anomaly at time `t` seconds after periapsis
    pub fn mean_anomaly(&self, t: f64) -> f64 {
        TAU * t / self.period
    }

    /// True anomaly for eccentric anomaly `psi`
    pub fn true_anomaly(&self, psi: f64) -> f64 {
        let e = self.eccentricity;
        2.0 * ((psi / 2.0).tan().abs() * ((1.0 + e) / (1.0 - e)).sqrt()).atan()
    }

    /// Orbital radius at true anomaly `phi`
    pub fn radius(&self, phi: f64) -> f64 {
        self.semi_latus_rectum / (1.0 + self.eccentricity * phi.cos())
    }
}

/// Solve Kepler's equation `M = ψ - e·sin(ψ)` for the eccentric anomaly `ψ`
///
/// Newton-Raphson from `ψ = 0`, stopping once successive estimates differ by
/// less than [`KEPLER_TOLERANCE`]. Fails with
/// [`KeplerError::ConvergenceFailure`] after [`KEPLER_MAX_ITERATIONS`].
pub fn solve_eccentric_anomaly(
    mean_anomaly: f64,
    eccentricity: f64,
) -> std::result::Result<f64, KeplerError> {
    let e = eccentricity;
    let mut psi = 0.0_f64;
    let mut last_step = f64::INFINITY;

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let next = psi - (psi - e * psi.sin() - mean_anomaly) / (1.0 - e * psi.cos());
        last_step = (next - psi).abs();
        psi = next;
        if last_step < KEPLER_TOLERANCE {
            return Ok(psi);
        }
    }

    Err(KeplerError::ConvergenceFailure {
        mean_anomaly,
        iterations: KEPLER_MAX_ITERATIONS,
        last_step,
    })
}

/// One point of an analytical trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSample {
    /// Seconds since periapsis
    pub time: f64,
    pub mean_anomaly: f64,
    pub eccentric_anomaly: f64,
    pub true_anomaly: f64,
    /// Distance from the central body (m)
    pub radius: f64,
    /// Cartesian position (m)
    pub position: Vec2<f64>,
}

/// Sampled analytical trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct KeplerTrajectory {
    geometry: OrbitGeometry,
    samples: Vec<KeplerSample>,
}

impl KeplerTrajectory {
    pub fn geometry(&self) -> &OrbitGeometry {
        &self.geometry
    }

    pub fn samples(&self) -> &[KeplerSample] {
        &self.samples
    }

    /// `(φ, r)` pairs in sample order
    pub fn polar(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| (s.true_anomaly, s.radius))
            .collect()
    }

    /// Cartesian positions in sample order
    pub fn positions(&self) -> Vec<Vec2<f64>> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Reconstructs an elliptical trajectory without force integration
#[derive(Debug, Clone)]
pub struct KeplerSolver {
    params: OrbitParameters,
    geometry: OrbitGeometry,
}

impl KeplerSolver {
    /// Validate `params` and derive the orbit geometry
    pub fn new(params: OrbitParameters) -> Result<Self> {
        params.validate()?;
        let geometry = params.geometry();

        if geometry.eccentricity > NEAR_PARABOLIC_ECCENTRICITY {
            warn!(
                "Eccentricity {} is near-parabolic; true anomaly will lose precision",
                geometry.eccentricity
            );
        }
        debug!(
            "Orbit geometry: a={} m, e={}, b={} m, p={} m, T={} s",
            geometry.semi_major_axis,
            geometry.eccentricity,
            geometry.semi_minor_axis,
            geometry.semi_latus_rectum,
            geometry.period
        );

        Ok(Self { params, geometry })
    }

    pub fn params(&self) -> &OrbitParameters {
        &self.params
    }

    pub fn geometry(&self) -> &OrbitGeometry {
        &self.geometry
    }

    /// Sample `index`, taken at `t = index·dt`
    pub fn sample(&self, index: usize) -> Result<KeplerSample> {
        let time = index as f64 * self.params.timestep;
        let mean_anomaly = self.geometry.mean_anomaly(time);
        let eccentric_anomaly = solve_eccentric_anomaly(mean_anomaly, self.geometry.eccentricity)?;
        let true_anomaly = self.geometry.true_anomaly(eccentric_anomaly);
        let radius = self.geometry.radius(true_anomaly);
        let position = Vec2::new(radius * true_anomaly.cos(), radius * true_anomaly.sin());

        Ok(KeplerSample {
            time,
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly,
            radius,
            position,
        })
    }

    /// Compute every configured sample
    pub fn solve(&self) -> Result<KeplerTrajectory> {
        info!(
            "Solving Kepler's equation for {} samples of {} s (period {:.1} days)",
            self.params.sample_count,
            self.params.timestep,
            self.geometry.period / DAY_S
        );

        let samples = (0..self.params.sample_count)
            .map(|i| self.sample(i))
            .collect::<Result<Vec<_>>>()?;

        Ok(KeplerTrajectory {
            geometry: self.geometry,
            samples,
        })
    }
}

impl Propagator for KeplerSolver {
    fn method(&self) -> &'static str {
        "Kepler's equation"
    }

    fn propagate(&mut self) -> Result<Vec<Vec2<f64>>> {
        Ok(self.solve()?.positions())
    }
}
