//! Celestial body definitions
//!
//! A [`CelestialBody`] pairs a fixed mass with the kinematic history the
//! integrator appends to. The initial condition is always entry 0.

pub mod record;

use crate::vector::Vec2;
use crate::{OrbitError, Result};

pub use self::record::{KinematicRecord, KinematicState, RecordError};

/// A massive body with a bounded trajectory history
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Name of the body
    pub name: String,
    mass: f64,
    history: KinematicRecord,
}

impl CelestialBody {
    /// Create a new celestial body
    ///
    /// `capacity` counts every entry the history can hold, the initial
    /// condition included. The mass must be positive and finite.
    pub fn new(
        name: &str,
        mass: f64,
        position: Vec2<f64>,
        velocity: Vec2<f64>,
        capacity: usize,
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(OrbitError::InvalidMass {
                name: name.to_string(),
                mass,
            });
        }

        let mut history = KinematicRecord::with_capacity(capacity)?;
        history.append(position, velocity)?;

        Ok(Self {
            name: name.to_string(),
            mass,
            history,
        })
    }

    /// Create a body that never moves, such as the central attractor
    pub fn fixed(name: &str, mass: f64, position: Vec2<f64>) -> Result<Self> {
        Self::new(name, mass, position, Vec2::new(0.0, 0.0), 1)
    }

    /// Mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Latest recorded state
    pub fn state(&self) -> Result<KinematicState> {
        Ok(self.history.current()?)
    }

    pub fn position(&self) -> Result<Vec2<f64>> {
        Ok(self.state()?.position)
    }

    pub fn velocity(&self) -> Result<Vec2<f64>> {
        Ok(self.state()?.velocity)
    }

    /// Record a new state at the end of the history
    pub fn record(&mut self, position: Vec2<f64>, velocity: Vec2<f64>) -> Result<()> {
        Ok(self.history.append(position, velocity)?)
    }

    pub fn history(&self) -> &KinematicRecord {
        &self.history
    }

    /// Consume the body, keeping only its history
    pub fn into_history(self) -> KinematicRecord {
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celestial_body() {
        let body = CelestialBody::new(
            "Earth",
            5.972e24,
            Vec2::new(1.496e11, 0.0),
            Vec2::new(0.0, 29_780.0),
            10,
        )
        .unwrap();

        assert_eq!(body.name, "Earth");
        assert_eq!(body.mass(), 5.972e24);
        assert_eq!(body.position().unwrap(), Vec2::new(1.496e11, 0.0));
        assert_eq!(body.velocity().unwrap(), Vec2::new(0.0, 29_780.0));
        assert_eq!(body.history().len(), 1);
        assert_eq!(body.history().capacity(), 10);
    }

    #[test]
    fn test_invalid_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = CelestialBody::fixed("Void", mass, Vec2::new(0.0, 0.0));
            assert!(matches!(result, Err(OrbitError::InvalidMass { .. })));
        }
    }

    #[test]
    fn test_fixed_body_is_full() {
        let mut sun = CelestialBody::fixed("Sun", 1.989e30, Vec2::new(0.0, 0.0)).unwrap();
        assert!(sun.history().is_full());

        let err = sun
            .record(Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            OrbitError::Record(RecordError::CapacityExceeded { capacity: 1 })
        ));
        assert_eq!(sun.position().unwrap(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_record_advances_state() {
        let mut body =
            CelestialBody::new("Satellite", 1.0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 3).unwrap();
        body.record(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.5)).unwrap();

        let state = body.state().unwrap();
        assert_eq!(state.position, Vec2::new(1.0, 0.0));
        assert_eq!(state.velocity, Vec2::new(1.0, 0.5));

        let history = body.into_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.remaining(), 1);
    }
}
