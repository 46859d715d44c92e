//! Integration tests for the spice CLI

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home: config file, log file and credentials all point into a temp dir
struct Harness {
    home: TempDir,
}

impl Harness {
    fn new() -> Self {
        Harness {
            home: TempDir::new().expect("temp home"),
        }
    }

    fn path(&self) -> &Path {
        self.home.path()
    }

    fn config_path(&self) -> PathBuf {
        self.path().join("spice.toml")
    }

    /// Command without credentials in the environment
    fn bare(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("spice");
        cmd.env("HOME", self.path());
        cmd.env("SPICE_CONFIG", self.config_path());
        cmd.env("SPICE_LOG_FILE", self.path().join("spice.log"));
        cmd.env_remove("SPICE_CLIENT_ID");
        cmd.env_remove("SPICE_CLIENT_SECRET");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Command with credentials supplied through the environment
    fn cmd(&self) -> Command {
        let mut cmd = self.bare();
        cmd.env("SPICE_CLIENT_ID", "cead0e44-a639-4388-ae35-ca0ba0f468a6");
        cmd.env("SPICE_CLIENT_SECRET", "test-secret-value");
        cmd
    }
}

#[test]
fn test_version() {
    Harness::new()
        .bare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("spice"));
}

#[test]
fn test_help() {
    Harness::new()
        .bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature registry"));
}

#[test]
fn test_invalid_command() {
    Harness::new().bare().arg("invalid").assert().failure();
}

#[test]
fn test_features_list() {
    Harness::new()
        .cmd()
        .arg("features")
        .assert()
        .success()
        .stdout(predicate::str::contains("pickup_hour"))
        .stdout(predicate::str::contains("weekday"))
        .stdout(predicate::str::contains("pickuptime"))
        .stdout(predicate::str::contains("NYC taxi"));
}

#[test]
fn test_feature_details() {
    Harness::new()
        .cmd()
        .args(["features", "pickuptime"])
        .assert()
        .success()
        .stdout(predicate::str::contains("used by"))
        .stdout(predicate::str::contains("pickup_hour, weekday"));
}

#[test]
fn test_unknown_feature_fails() {
    Harness::new()
        .cmd()
        .args(["features", "dropoff_hour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not registered"));
}

#[test]
fn test_missing_credentials_fail() {
    Harness::new()
        .bare()
        .arg("features")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));
}

#[test]
fn test_failure_reports_log_file_when_verbose() {
    let env = Harness::new();
    env.bare()
        .args(["-v", "features"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Log file:"))
        .stderr(predicate::str::contains("spice.log"));

    let log = fs::read_to_string(env.path().join("spice.log")).expect("log written");
    assert!(log.contains("ERROR Configuration error: Missing credentials"));
}

#[test]
fn test_missing_config_file_traced_at_vv() {
    Harness::new()
        .cmd()
        .args(["-vv", "features"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No config file at"));
}

#[test]
fn test_compute_spec_example() {
    Harness::new()
        .cmd()
        .args(["compute", "--pickup-datetime", "2016-01-15 08:23:00", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pickup_hour\":8"))
        .stdout(predicate::str::contains("\"weekday\":15"))
        .stdout(predicate::str::contains("\"pickuptime\":\"2016-01-15 08:23:00\""));
}

#[test]
fn test_compute_without_pickup_fails() {
    Harness::new()
        .cmd()
        .arg("compute")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pickup_datetime"));
}

#[test]
fn test_compute_rejects_bad_timestamp() {
    Harness::new()
        .cmd()
        .args(["compute", "--pickup-datetime", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a timestamp"));
}

#[test]
fn test_export_stdout_toml() {
    Harness::new()
        .cmd()
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("project = \"NYC taxi\""))
        .stdout(predicate::str::contains("[[features]]"))
        .stdout(predicate::str::contains("test-secret-value").not());
}

#[test]
fn test_export_json_file() {
    let env = Harness::new();
    let output = env.path().join("out").join("manifest.json");
    env.cmd()
        .args(["export", "--output"])
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("manifest written");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(json["project"], "NYC taxi");
    assert_eq!(json["features"].as_array().map(|f| f.len()), Some(3));
}

#[test]
fn test_submit_records_manifest() {
    let env = Harness::new();
    let dir = env.path().join("registry");
    env.cmd()
        .args(["submit", "--dir"])
        .arg(&dir)
        .assert()
        .success();

    let content = fs::read_to_string(dir.join("nyc-taxi.toml")).expect("submission written");
    assert!(content.contains("cead0e44-a639-4388-ae35-ca0ba0f468a6"));
    assert!(!content.contains("test-secret-value"));
    assert!(content.contains("pickup_hour"));
}

#[test]
fn test_config_set_and_show() {
    let env = Harness::new();
    env.bare()
        .args(["config", "set", "client-id", "from-file"])
        .assert()
        .success();
    env.bare()
        .args(["config", "set", "client-secret", "9ZjF4ADOYdU"])
        .assert()
        .success()
        .stderr(predicate::str::contains("plain text"));

    env.bare()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("from-file"))
        .stdout(predicate::str::contains("9ZjF****"))
        .stdout(predicate::str::contains("9ZjF4ADOYdU").not());

    // credentials from the file are enough for registry commands
    env.bare().arg("features").assert().success();
}

#[test]
fn test_config_set_unknown_key() {
    Harness::new()
        .bare()
        .args(["config", "set", "python-version", "3.12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Supported keys"));
}

#[test]
fn test_config_path() {
    let env = Harness::new();
    env.bare()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spice.toml"));
}
