//! Integration tests for pbridge

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Command using the fixture config; the home directory (and with it the log
/// file) is redirected into `home`.
fn pbridge_cmd(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pbridge");
    cmd.env("PBRIDGE_CONFIG", fixtures_dir().join("pbridge.toml"))
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

fn home() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(e) => panic!("failed to create temp dir: {e}"),
    }
}

#[test]
fn test_version() {
    let home = home();
    pbridge_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pbridge"));
}

#[test]
fn test_help() {
    let home = home();
    pbridge_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("typed parameter wrappers"));
}

#[test]
fn test_invalid_command() {
    let home = home();
    pbridge_cmd(&home).arg("invalid").assert().failure();
}

#[test]
fn test_list_tools() {
    let home = home();
    pbridge_cmd(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Smoothing"))
        .stdout(predicate::str::contains("Documentation"))
        .stdout(predicate::str::contains("not runnable"));
}

#[test]
fn test_list_with_explicit_empty_catalog() {
    let home = home();
    let catalog = home.path().join("empty.toml");
    assert!(fs::write(&catalog, "version = \"1.0\"\n").is_ok());
    pbridge_cmd(&home)
        .arg("--catalog")
        .arg(&catalog)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tools found"));
}

#[test]
fn test_describe_marks_unsupported() {
    let home = home();
    pbridge_cmd(&home)
        .args(["describe", "Smoothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scalar-integer"))
        .stdout(predicate::str::contains("vector-integer"))
        .stdout(predicate::str::contains("enumeration-string"))
        .stdout(predicate::str::contains("unsupported"));
}

#[test]
fn test_describe_json() {
    let home = home();
    pbridge_cmd(&home)
        .args(["describe", "Smoothing", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"scalar-double\""))
        .stdout(predicate::str::contains("\"kind\": null"));
}

#[test]
fn test_describe_unknown_tool_fails() {
    let home = home();
    pbridge_cmd(&home)
        .args(["describe", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tool named 'Nope'"));
}

#[test]
fn test_value_reads_current_value() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "iterations"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"scalar-integer\""))
        .stdout(predicate::str::contains("\"value\": 5"));
}

#[test]
fn test_value_set_through_control() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "seeds", "--set", "3, 4,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"vector-integer\""))
        .stdout(predicate::str::contains("\"control\": \"list-edit\""));
}

#[test]
fn test_value_set_rejects_malformed_number() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "timeStep", "--set", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse 'fast'"));
}

#[test]
fn test_value_enumeration_respects_elements() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "interpolation", "--set", "Cubic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"Cubic\""))
        .stdout(predicate::str::contains("\"Nearest\""));

    pbridge_cmd(&home)
        .args(["value", "Smoothing", "interpolation", "--set", "Bicubic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an allowed value"));
}

#[test]
fn test_value_unrecognized_parameter_fails() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "inputVolume"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown parameter: inputVolume of type image"));
}

#[test]
fn test_value_unknown_parameter_fails() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Smoothing", "radius"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to find parameter with name: radius"));
}

#[test]
fn test_value_non_runnable_tool_fails() {
    let home = home();
    pbridge_cmd(&home)
        .args(["value", "Documentation", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unable to find CLI logic for module with the name: Documentation",
        ));
}

#[test]
fn test_plan_step() {
    let home = home();
    pbridge_cmd(&home)
        .args(["plan", "Smoothing", "--exclude", "interpolation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PipelineWrapper_Smoothing"))
        .stdout(predicate::str::contains("vtkMRMLScalarVolumeNode"))
        .stdout(predicate::str::contains("\"PipelineCreator\""))
        .stdout(predicate::str::contains("SetTimestep"));
}

#[test]
fn test_plan_rejects_unsupported_tag() {
    let home = home();
    pbridge_cmd(&home)
        .args(["plan", "Smoothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("string-enumeration"));
}

#[test]
fn test_about() {
    let home = home();
    pbridge_cmd(&home)
        .arg("about")
        .assert()
        .success()
        .stdout(predicate::str::contains("PipelineCLIBridge"))
        .stdout(predicate::str::contains("Pipelines.Advanced"));

    pbridge_cmd(&home)
        .args(["about", "--legacy", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hidden\": true"))
        .stdout(predicate::str::contains("SlicerSALT"));
}

#[test]
fn test_config_show() {
    let home = home();
    pbridge_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("tools.toml"));
}

#[test]
fn test_config_path_shows_log_file() {
    let home = home();
    pbridge_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pbridge.toml"))
        .stdout(predicate::str::contains("log-file"))
        .stdout(predicate::str::contains("pbridge.log"));
}

#[test]
fn test_config_set_writes_file() {
    let home = home();
    let config_path = home.path().join("pbridge.toml");

    let mut cmd = pbridge_cmd(&home);
    cmd.env("PBRIDGE_CONFIG", &config_path)
        .args(["config", "set", "flavor", "legacy"])
        .assert()
        .success();

    let written = fs::read_to_string(&config_path).unwrap_or_default();
    assert!(written.contains("flavor = \"legacy\""));

    let mut cmd = pbridge_cmd(&home);
    cmd.env("PBRIDGE_CONFIG", &config_path)
        .args(["config", "set", "color", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
