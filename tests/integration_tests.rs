use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn vitals() -> Command {
    Command::cargo_bin("vitals").expect("binary exists")
}

/// Config whose result API points at the local discard port: every fetch is
/// refused instantly and the cycle must degrade to "no data", not fail.
fn offline_config(dir: &TempDir) -> std::path::PathBuf {
    offline_config_with_versions(dir, r#"["v1"]"#)
}

fn offline_config_with_versions(dir: &TempDir, versions: &str) -> std::path::PathBuf {
    let path = dir.path().join("reporting.yaml");
    fs::write(
        &path,
        format!(
            r#"
general:
  period: 10
  versions: {versions}
  installers: ["installerA"]
  nb_iteration_tests_success_criteria: 4
  url: "https://reports.example.org"
  log:
    level: "info"
    file: "{}"
testapi:
  url: "http://127.0.0.1:9/api/v1/results"
tests:
  list: ["caseX"]
"#,
            dir.path().join("vitals.log").display()
        ),
    )
    .unwrap();
    path
}

// ---------------------------------------------------------------------------
// CLI smoke tests
// ---------------------------------------------------------------------------

#[test]
fn test_help_output() {
    vitals()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("health reporting"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    vitals()
        .args(["--config", "/nonexistent/reporting.yaml"])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_partial_config_fails_before_processing() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("reporting.yaml");
    fs::write(&config, "general:\n  period: 10\n").unwrap();

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));

    // Fail fast: nothing may have been written.
    assert!(!tmp.path().join("v1").exists());
}

// ---------------------------------------------------------------------------
// Reporting cycle against an unreachable API
// ---------------------------------------------------------------------------

#[test]
fn test_cycle_degrades_to_no_data() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config(&tmp);

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("status")
        .assert()
        .success();

    let ledger = fs::read_to_string(tmp.path().join("v1/testcases_history.txt")).unwrap();
    let lines: Vec<&str> = ledger.lines().collect();
    assert_eq!(lines[0], "date,testcase,installer,detail,score");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(",caseX,installerA,0/3,0.0"));

    let html = fs::read_to_string(tmp.path().join("v1/status-installerA.html")).unwrap();
    assert!(html.contains("caseX"));
}

#[test]
fn test_rerun_appends_second_row() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config(&tmp);

    for _ in 0..2 {
        vitals()
            .args(["--config", config.to_str().unwrap()])
            .args(["--output", tmp.path().to_str().unwrap()])
            .arg("status")
            .assert()
            .success();
    }

    let ledger = fs::read_to_string(tmp.path().join("v1/testcases_history.txt")).unwrap();
    // Header once, one row per run.
    assert_eq!(ledger.lines().count(), 3);
    assert_eq!(
        ledger
            .lines()
            .filter(|l| *l == "date,testcase,installer,detail,score")
            .count(),
        1
    );
}

#[test]
fn test_rerun_with_dedup_keeps_one_row() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config(&tmp);

    for _ in 0..2 {
        vitals()
            .args(["--config", config.to_str().unwrap()])
            .args(["--output", tmp.path().to_str().unwrap()])
            .args(["status", "--dedup"])
            .assert()
            .success();
    }

    let ledger = fs::read_to_string(tmp.path().join("v1/testcases_history.txt")).unwrap();
    assert_eq!(ledger.lines().count(), 2);
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

#[test]
fn test_status_with_csv_export() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config(&tmp);

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .args(["status", "--csv"])
        .assert()
        .success();

    let csv =
        fs::read_to_string(tmp.path().join("v1/testcases_history_installerA.csv")).unwrap();
    assert!(csv.starts_with("date,testcase,installer,detail,score"));
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_export_subcommand_reuses_existing_ledger() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config(&tmp);

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("status")
        .assert()
        .success();

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("export")
        .assert()
        .success();

    assert!(tmp
        .path()
        .join("v1/testcases_history_installerA.csv")
        .exists());
}

#[test]
fn test_export_skips_broken_version() {
    let tmp = TempDir::new().unwrap();
    let config = offline_config_with_versions(&tmp, r#"["frozen", "v1"]"#);

    // A plain file where the first version's directory should go makes its
    // ledger unreachable; the sibling version must still export.
    fs::write(tmp.path().join("frozen"), "not a directory").unwrap();

    vitals()
        .args(["--config", config.to_str().unwrap()])
        .args(["--output", tmp.path().to_str().unwrap()])
        .arg("export")
        .assert()
        .success();

    assert!(!tmp.path().join("frozen").is_dir());
    assert!(tmp
        .path()
        .join("v1/testcases_history_installerA.csv")
        .exists());
}
