//! End-to-end orbit scenarios for both propagation methods

use std::fs;

use approx::assert_relative_eq;
use rstest::rstest;
use tempfile::tempdir;

use orbitsim::constants::{DAY_S, G, TAU};
use orbitsim::{
    FlatLogWriter, IntegrationScheme, KeplerSolver, OrbitParameters, PositionSink, Propagator,
    SimulationConfig, TwoBodySimulation, Vec2,
};

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const AU: f64 = 1.496e11;

fn earth_orbit(timestep: f64, iterations: usize) -> TwoBodySimulation {
    let speed = (G * SUN_MASS / AU).sqrt();
    TwoBodySimulation::around_origin(
        SUN_MASS,
        EARTH_MASS,
        Vec2::new(AU, 0.0),
        Vec2::new(0.0, speed),
        timestep,
        iterations,
    )
    .unwrap()
}

#[test]
fn circular_kepler_orbit() {
    let radius = 1.0e11;
    let central_mass = 2.0e30;
    let params = OrbitParameters::new(radius, radius, central_mass, DAY_S, 365).unwrap();
    let solver = KeplerSolver::new(params).unwrap();
    let trajectory = solver.solve().unwrap();

    let period = TAU * (radius.powi(3) / (G * central_mass)).sqrt();
    assert_relative_eq!(trajectory.geometry().period, period);
    assert_eq!(trajectory.geometry().eccentricity, 0.0);
    assert_eq!(trajectory.len(), 365);

    for position in trajectory.positions() {
        assert_relative_eq!(position.magnitude().unwrap(), radius, max_relative = 1e-12);
    }

    // One period later the body is back at the start, to within one step of arc
    let start = trajectory.positions()[0];
    assert_eq!(start, Vec2::new(radius, 0.0));
    let nearest = (period / DAY_S).round() as usize;
    let back = trajectory.positions()[nearest];
    let arc_per_step = TAU * radius * DAY_S / period;
    assert!(back.distance(&start).unwrap() < arc_per_step);
}

#[rstest]
#[case(1.0e11, 2.0e11)]
#[case(2.0e11, 1.0e11)]
#[case(1.471e11, 1.521e11)]
fn eccentric_kepler_orbit_stays_between_extremes(#[case] r1: f64, #[case] r2: f64) {
    let params = OrbitParameters::new(r1, r2, SUN_MASS, DAY_S, 800).unwrap();
    let mut solver = KeplerSolver::new(params).unwrap();
    let positions = solver.propagate().unwrap();

    let (near, far) = (r1.min(r2), r1.max(r2));
    assert_relative_eq!(positions[0].x(), near, max_relative = 1e-12);
    for position in &positions {
        let r = position.magnitude().unwrap();
        assert!(r >= near * (1.0 - 1e-9) && r <= far * (1.0 + 1e-9));
        assert!(position.y() >= 0.0);
    }
}

#[rstest]
#[case(IntegrationScheme::SemiImplicitEuler)]
#[case(IntegrationScheme::RungeKutta4)]
fn force_integration_is_deterministic(#[case] scheme: IntegrationScheme) {
    let first = earth_orbit(DAY_S, 365).with_scheme(scheme).propagate().unwrap();
    let second = earth_orbit(DAY_S, 365).with_scheme(scheme).propagate().unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.x().to_bits(), b.x().to_bits());
        assert_eq!(a.y().to_bits(), b.y().to_bits());
    }
}

#[test]
fn force_integration_keeps_earth_near_one_au() {
    let iterations = 365 * 24;
    let mut simulation = earth_orbit(3600.0, iterations);
    let positions = simulation.propagate().unwrap();

    assert_eq!(positions.len(), iterations + 1);
    assert_eq!(positions[0], Vec2::new(AU, 0.0));
    for position in &positions {
        assert_relative_eq!(position.magnitude().unwrap(), AU, max_relative = 0.01);
    }

    // The orbit goes all the way round in a year
    assert!(positions.iter().any(|p| p.x() < -0.9 * AU));
    assert!(positions.iter().any(|p| p.y() < -0.9 * AU));
}

#[test]
fn positional_run_writes_flat_log() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simulation_data.log");

    let config = SimulationConfig::from_positional(&[
        10.0, 3600.0, 1.9891e30, 5.9722e24, 75e9, 0.0, 0.0, 57000.0,
    ])
    .unwrap();
    assert_eq!(config.iterations, 240);

    let positions = config.propagator().unwrap().propagate().unwrap();
    let mut writer = FlatLogWriter::create(&path).unwrap();
    assert_eq!(writer.write_positions(&positions).unwrap(), 241);
    writer.finish().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 241);
    assert_eq!(lines[0], "75000000000;0");

    for (line, position) in lines.iter().zip(&positions) {
        let (x, y) = line.split_once(';').unwrap();
        assert_eq!(x.parse::<f64>().unwrap(), position.x());
        assert_eq!(y.parse::<f64>().unwrap(), position.y());
    }
}

#[test]
fn analytic_run_writes_one_line_per_sample() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kepler.log");

    let config = SimulationConfig::from_positional(&[30.0, DAY_S, 2.0e30, 1.0e11, 1.5e11]).unwrap();
    let positions = config.propagator().unwrap().propagate().unwrap();

    let mut writer = FlatLogWriter::create(&path).unwrap();
    writer.write_positions(&positions).unwrap();
    writer.finish().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 30);
    assert!(contents.lines().all(|line| line.split(';').count() == 2));
}

#[test]
fn runge_kutta_tracks_circular_orbit_closer() {
    let iterations = 365;
    let rk4 = earth_orbit(DAY_S, iterations)
        .with_scheme(IntegrationScheme::RungeKutta4)
        .propagate()
        .unwrap();
    let euler = earth_orbit(DAY_S, iterations).propagate().unwrap();

    let worst = |positions: &[Vec2<f64>]| {
        positions
            .iter()
            .map(|p| (p.magnitude().unwrap() / AU - 1.0).abs())
            .fold(0.0_f64, f64::max)
    };
    assert!(worst(&rk4) < 1e-7);
    assert!(worst(&euler) > 1e-2);
}
