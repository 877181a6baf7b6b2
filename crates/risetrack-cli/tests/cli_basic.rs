//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! (RISETRACK_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "risetrack-cli", "--"])
        .args(args)
        .env("RISETRACK_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_record_round_trip() {
    let day = "2031-06-15";
    let _ = run_cli(&["record", "delete", day]);

    let (stdout, stderr, code) = run_cli(&["record", "add", day, "06:55", "--note", "early"]);
    assert_eq!(code, 0, "record add failed: {stderr}");
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["day"], day);
    assert_eq!(record["wake_time"], "06:55");
    assert_eq!(record["note"], "early");

    let (stdout, _, code) = run_cli(&["record", "show", day]);
    assert_eq!(code, 0);
    let shown: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown["wake_time"], "06:55");

    let (stdout, _, code) = run_cli(&["record", "update", day, "--wake-time", "07:20", "--note", ""]);
    assert_eq!(code, 0);
    let updated: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(updated["wake_time"], "07:20");
    assert!(updated["note"].is_null());

    let (stdout, _, code) = run_cli(&["record", "delete", day]);
    assert_eq!(code, 0);
    assert!(stdout.contains("deleted"));
}

#[test]
fn test_duplicate_add_fails() {
    let day = "2031-07-01";
    let _ = run_cli(&["record", "delete", day]);

    let (_, _, code) = run_cli(&["record", "add", day, "06:55"]);
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(&["record", "add", day, "07:05"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");

    let _ = run_cli(&["record", "delete", day]);
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let (_, stderr, code) = run_cli(&["record", "add", "not-a-day", "06:55"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("YYYY-MM-DD"), "stderr: {stderr}");

    let (_, stderr, code) = run_cli(&["record", "add", "2031-08-01", "25:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("HH:MM"), "stderr: {stderr}");

    let (_, stderr, code) = run_cli(&["record", "update", "2031-08-01"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Nothing to update"), "stderr: {stderr}");

    let (_, _, code) = run_cli(&["record", "show", "2031-08-02"]);
    assert_ne!(code, 0);
}

#[test]
fn test_record_list_runs() {
    let (stdout, _, code) = run_cli(&["record", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.is_array());
}

#[test]
fn test_streak_reports_fields() {
    let (stdout, stderr, code) = run_cli(&["streak", "--target-time", "07:00", "--tolerance-min", "10"]);
    assert_eq!(code, 0, "streak failed: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["target_time"], "07:00");
    assert_eq!(report["tolerance_min"], 10);
    assert!(report["current_streak"].is_number());
    assert!(report["best_streak"].is_number());
}

#[test]
fn test_config_list_and_get() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(config["streak"]["target_time"].is_string());

    let (stdout, _, code) = run_cli(&["config", "get", "server.bind"]);
    assert_eq!(code, 0);
    assert!(!stdout.trim().is_empty());
}
