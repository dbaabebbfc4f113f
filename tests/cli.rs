//! Exit status and log contents of the `orbit_sim` binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use rstest::rstest;
use tempfile::tempdir;

fn orbit_sim(output: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_orbit_sim"))
        .arg("--output")
        .arg(output)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn wrong_argument_count_writes_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simulation_data.log");

    let result = orbit_sim(&path, &["1", "2", "3"]);
    assert!(!result.status.success());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Error - Not enough data\n"
    );
}

#[test]
fn invalid_timestep_writes_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simulation_data.log");

    let result = orbit_sim(&path, &["10", "0", "2e30", "1e11", "1e11"]);
    assert!(!result.status.success());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Error - Not enough data\n"
    );
}

#[rstest]
#[case(&["365", "86400", "2e30", "abc", "1e11"])]
#[case(&["1e15", "1", "2e30", "1", "1e11", "0", "0", "1"])]
#[case(&["--method", "rk4", "1", "3600", "2e30", "1e11", "1e11"])]
#[case(&["365", "86400", "2e30", "1e11", "3e11"])]
fn failed_run_writes_placeholder(#[case] args: &[&str]) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("simulation_data.log");

    let result = orbit_sim(&path, args);
    assert!(!result.status.success());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Error - Not enough data\n"
    );
}

#[test]
fn runge_kutta_method_selected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rk4.log");

    let result = orbit_sim(
        &path,
        &[
            "--method", "rk4", "--summary", "1", "3600", "1.989e30", "5.972e24", "1.496e11", "0",
            "0", "29780",
        ],
    );
    assert!(result.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(summary["method"], "Runge-Kutta 4 force integration");
    assert_eq!(summary["config"]["mode"]["scheme"], "runge_kutta4");
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 25);
}

#[test]
fn force_run_accepts_negative_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("force.log");

    let result = orbit_sim(
        &path,
        &["1", "3600", "1.989e30", "5.972e24", "-1.496e11", "0", "0", "-29780"],
    );
    assert!(result.status.success());

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 25);
    assert_eq!(contents.lines().next(), Some("-149600000000;0"));
}

#[test]
fn analytic_run_prints_summary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kepler.log");

    let result = orbit_sim(&path, &["--summary", "365", "86400", "2e30", "1e11", "1.5e11"]);
    assert!(result.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(summary["method"], "Kepler's equation");
    assert_eq!(summary["samples"], 365);
    assert_eq!(summary["config"]["mode"]["mode"], "analytic");
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 365);
}

#[test]
fn unwritable_output_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.log");

    let result = orbit_sim(&path, &["1", "3600", "2e30", "1e11", "1e11"]);
    assert!(!result.status.success());
    assert!(!path.exists());
}
