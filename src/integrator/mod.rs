//! Fixed-step gravity integration for a two-body system
//!
//! The moving (target) body is advanced under the pull of a fixed (source)
//! body with a half-step Euler scheme. Per step, with `a` computed once from
//! the pre-step positions:
//!
//! ```text
//! v_half = v + a * dt * 0.5
//! x_new  = x + v_half * dt
//! v_new  = v_half + a * dt * 0.5
//! ```
//!
//! `a` is not re-evaluated at `x_new`, so this is not velocity-Verlet.
//!
//! [`IntegrationScheme::RungeKutta4`] swaps that rule for the classical
//! fourth-order Runge-Kutta step on `(x, v)`, evaluating the force four times
//! per step. Either way the step size is fixed; there is no error control.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::celestial::{CelestialBody, KinematicState};
use crate::constants::G;
use crate::vector::{Vec2, VectorError};
use crate::{Propagator, Result};

/// Relative energy drift above which a finished run is flagged
const ENERGY_DRIFT_WARNING: f64 = 0.01;

/// Update rule applied at every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// One acceleration per step, applied as two half kicks around a drift
    #[default]
    SemiImplicitEuler,
    /// Classical fourth-order Runge-Kutta
    RungeKutta4,
}

impl IntegrationScheme {
    pub fn name(&self) -> &'static str {
        match self {
            IntegrationScheme::SemiImplicitEuler => "semi-implicit Euler",
            IntegrationScheme::RungeKutta4 => "Runge-Kutta 4",
        }
    }
}

impl fmt::Display for IntegrationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Advances a body's state under the gravity of another body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityIntegrator {
    timestep: f64,
    gravitational_constant: f64,
    scheme: IntegrationScheme,
}

impl GravityIntegrator {
    /// Create a semi-implicit Euler integrator with step `timestep` seconds and the standard `G`
    pub fn new(timestep: f64) -> Self {
        Self {
            timestep,
            gravitational_constant: G,
            scheme: IntegrationScheme::default(),
        }
    }

    /// Replace the gravitational constant
    pub fn with_gravitational_constant(mut self, gravitational_constant: f64) -> Self {
        self.gravitational_constant = gravitational_constant;
        self
    }

    /// Replace the update rule
    pub fn with_scheme(mut self, scheme: IntegrationScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    /// Gravitational force exerted on `target` by `source`, in newtons
    ///
    /// The force points from the target toward the source. Fails with
    /// [`VectorError::DivisionByZero`] if the two bodies coincide.
    pub fn attraction_force(
        &self,
        source: &CelestialBody,
        target: &CelestialBody,
    ) -> Result<Vec2<f64>> {
        self.force_at(source, target.mass(), target.position()?)
    }

    /// Acceleration of `target` due to `source`, in m/s²
    pub fn acceleration(&self, source: &CelestialBody, target: &CelestialBody) -> Result<Vec2<f64>> {
        self.acceleration_at(source, target, target.position()?)
    }

    /// Force on a body of `target_mass` placed at `position`
    fn force_at(
        &self,
        source: &CelestialBody,
        target_mass: f64,
        position: Vec2<f64>,
    ) -> Result<Vec2<f64>> {
        let displacement = source.position()?.sub(&position)?;
        let distance_squared: f64 = displacement.magnitude_squared()?;
        if distance_squared == 0.0 {
            return Err(VectorError::DivisionByZero.into());
        }

        let factor = self.gravitational_constant * source.mass() * target_mass / distance_squared;
        Ok(displacement.normalized()?.scale(factor)?)
    }

    /// Acceleration `target` would have if it were at `position`
    fn acceleration_at(
        &self,
        source: &CelestialBody,
        target: &CelestialBody,
        position: Vec2<f64>,
    ) -> Result<Vec2<f64>> {
        let force = self.force_at(source, target.mass(), position)?;
        Ok(force.scale_div(target.mass())?)
    }

    /// Advance `target` by one step and record the new state
    pub fn step(&self, source: &CelestialBody, target: &mut CelestialBody) -> Result<KinematicState> {
        let next = match self.scheme {
            IntegrationScheme::SemiImplicitEuler => self.semi_implicit_step(source, target)?,
            IntegrationScheme::RungeKutta4 => self.runge_kutta_step(source, target)?,
        };
        target.record(next.position, next.velocity)?;
        Ok(next)
    }

    fn semi_implicit_step(
        &self,
        source: &CelestialBody,
        target: &CelestialBody,
    ) -> Result<KinematicState> {
        let acceleration = self.acceleration(source, target)?;
        let KinematicState { position, velocity } = target.state()?;

        let half_kick = acceleration.scale(self.timestep)?.scale(0.5)?;
        let velocity_half = velocity.add(&half_kick)?;
        let new_position = position.add(&velocity_half.scale(self.timestep)?)?;
        let new_velocity = velocity_half.add(&half_kick)?;

        Ok(KinematicState::new(new_position, new_velocity))
    }

    fn runge_kutta_step(
        &self,
        source: &CelestialBody,
        target: &CelestialBody,
    ) -> Result<KinematicState> {
        let dt = self.timestep;
        let half = 0.5 * dt;
        let KinematicState { position, velocity } = target.state()?;

        // k·_v are position derivatives, k·_a velocity derivatives
        let k1_v = velocity;
        let k1_a = self.acceleration_at(source, target, position)?;
        let k2_v = velocity.add(&k1_a.scale(half)?)?;
        let k2_a = self.acceleration_at(source, target, position.add(&k1_v.scale(half)?)?)?;
        let k3_v = velocity.add(&k2_a.scale(half)?)?;
        let k3_a = self.acceleration_at(source, target, position.add(&k2_v.scale(half)?)?)?;
        let k4_v = velocity.add(&k3_a.scale(dt)?)?;
        let k4_a = self.acceleration_at(source, target, position.add(&k3_v.scale(dt)?)?)?;

        let new_position = position.add(&runge_kutta_increment(k1_v, k2_v, k3_v, k4_v, dt)?)?;
        let new_velocity = velocity.add(&runge_kutta_increment(k1_a, k2_a, k3_a, k4_a, dt)?)?;
        Ok(KinematicState::new(new_position, new_velocity))
    }

    /// Advance `target` by `iterations` steps
    ///
    /// Stops at the first failing step. A target whose history is too small
    /// for `iterations` more entries fails with `CapacityExceeded` once full.
    pub fn run(
        &self,
        source: &CelestialBody,
        target: &mut CelestialBody,
        iterations: usize,
    ) -> Result<()> {
        let report_every = (iterations / 10).max(1);
        for step in 1..=iterations {
            let state = self.step(source, target)?;
            if step % report_every == 0 {
                debug!(
                    "{}: step {}/{} at {} m, {} m/s",
                    target.name, step, iterations, state.position, state.velocity
                );
            }
        }
        Ok(())
    }

    /// Specific orbital energy `v²/2 - G·M/r` of `target` around `source`, in J/kg
    pub fn specific_energy(&self, source: &CelestialBody, target: &CelestialBody) -> Result<f64> {
        let state = target.state()?;
        let distance = source.position()?.distance(&state.position)?;
        if distance == 0.0 {
            return Err(VectorError::DivisionByZero.into());
        }
        let speed_squared: f64 = state.velocity.magnitude_squared()?;
        Ok(0.5 * speed_squared - self.gravitational_constant * source.mass() / distance)
    }
}

/// `dt/6 · (k1 + 2·k2 + 2·k3 + k4)`
fn runge_kutta_increment(
    k1: Vec2<f64>,
    k2: Vec2<f64>,
    k3: Vec2<f64>,
    k4: Vec2<f64>,
    dt: f64,
) -> Result<Vec2<f64>> {
    let sum = k1.add(&k2.scale(2.0)?)?.add(&k3.scale(2.0)?)?.add(&k4)?;
    Ok(sum.scale(dt / 6.0)?)
}

/// A fixed attractor, one moving body, and the integrator driving them
#[derive(Debug, Clone)]
pub struct TwoBodySimulation {
    source: CelestialBody,
    target: CelestialBody,
    integrator: GravityIntegrator,
    iterations: usize,
}

impl TwoBodySimulation {
    /// Build a simulation of `iterations` steps
    ///
    /// The target history must have room for `iterations` more entries.
    pub fn new(
        source: CelestialBody,
        target: CelestialBody,
        integrator: GravityIntegrator,
        iterations: usize,
    ) -> Self {
        Self {
            source,
            target,
            integrator,
            iterations,
        }
    }

    /// Standard setup: attractor fixed at the origin, target sized for the run
    pub fn around_origin(
        central_mass: f64,
        moving_mass: f64,
        initial_position: Vec2<f64>,
        initial_velocity: Vec2<f64>,
        timestep: f64,
        iterations: usize,
    ) -> Result<Self> {
        let source = CelestialBody::fixed("central body", central_mass, Vec2::new(0.0, 0.0))?;
        let target = CelestialBody::new(
            "orbiter",
            moving_mass,
            initial_position,
            initial_velocity,
            iterations.saturating_add(1),
        )?;
        Ok(Self::new(
            source,
            target,
            GravityIntegrator::new(timestep),
            iterations,
        ))
    }

    /// Switch the update rule used by the run
    pub fn with_scheme(mut self, scheme: IntegrationScheme) -> Self {
        self.integrator = self.integrator.with_scheme(scheme);
        self
    }

    pub fn source(&self) -> &CelestialBody {
        &self.source
    }

    pub fn target(&self) -> &CelestialBody {
        &self.target
    }

    pub fn integrator(&self) -> &GravityIntegrator {
        &self.integrator
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every configured step, logging the energy drift at the end
    pub fn run(&mut self) -> Result<()> {
        info!(
            "Integrating {} {} steps of {} s: {} ({} kg) around {} ({} kg)",
            self.iterations,
            self.integrator.scheme(),
            self.integrator.timestep(),
            self.target.name,
            self.target.mass(),
            self.source.name,
            self.source.mass()
        );

        let initial_energy = self.integrator.specific_energy(&self.source, &self.target)?;
        self.integrator
            .run(&self.source, &mut self.target, self.iterations)?;
        let final_energy = self.integrator.specific_energy(&self.source, &self.target)?;

        let drift = if initial_energy != 0.0 {
            ((final_energy - initial_energy) / initial_energy).abs()
        } else {
            0.0
        };
        if drift > ENERGY_DRIFT_WARNING {
            warn!(
                "Specific energy drifted by {:.3}% ({} -> {} J/kg); consider a smaller timestep",
                drift * 100.0,
                initial_energy,
                final_energy
            );
        } else {
            info!(
                "Specific energy {} -> {} J/kg (drift {:.3e})",
                initial_energy, final_energy, drift
            );
        }
        Ok(())
    }
}

impl Propagator for TwoBodySimulation {
    fn method(&self) -> &'static str {
        match self.integrator.scheme() {
            IntegrationScheme::SemiImplicitEuler => "force integration",
            IntegrationScheme::RungeKutta4 => "Runge-Kutta 4 force integration",
        }
    }

    fn propagate(&mut self) -> Result<Vec<Vec2<f64>>> {
        self.run()?;
        Ok(self.target.history().positions().to_vec())
    }
}
