//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They use the
//! development config directory so a user's real settings are left alone.

use std::io::Write;
use std::process::{Command, Stdio};

const ERROR_MESSAGE: &str = "Sorry, there was a problem calculating your bedtime.";

fn cli() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-q", "-p", "betterrest-cli", "--"])
        .env("BETTERREST_ENV", "dev");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = cli()
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_calc_with_explicit_inputs() {
    let (stdout, stderr, code) = run_cli(&[
        "calc", "--wake", "07:00", "--sleep", "8", "--coffee", "1", "--clock", "24h",
    ]);
    assert_eq!(code, 0, "calc failed: {stderr}");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.first(), Some(&"Your ideal bedtime is..."));
    assert_eq!(lines.get(1), Some(&"22:51"));
}

#[test]
fn test_calc_json() {
    let (stdout, stderr, code) = run_cli(&[
        "calc", "--wake", "06:30", "--sleep", "9.5", "--coffee", "3", "--json",
    ]);
    assert_eq!(code, 0, "calc --json failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["title"], "Your ideal bedtime is...");
    assert!(parsed["message"].as_str().unwrap().ends_with('M'));
    assert!(parsed["predicted_sleep_hours"].as_f64().unwrap() > 9.0);
}

#[test]
fn test_calc_missing_model_shows_fixed_error() {
    let (stdout, _stderr, code) = run_cli(&[
        "calc", "--model", "/nonexistent/betterrest/SleepCalculator.json",
    ]);
    assert_eq!(code, 1);
    assert!(stdout.starts_with("Error\n"), "unexpected output: {stdout}");
    assert!(stdout.contains(ERROR_MESSAGE));
    assert!(!stdout.contains("nonexistent"));
}

#[test]
fn test_calc_rejects_bad_wake_time() {
    let (_stdout, stderr, code) = run_cli(&["calc", "--wake", "7am"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid wake time"));
}

#[test]
fn test_model_show() {
    let (stdout, stderr, code) = run_cli(&["model", "show"]);
    assert_eq!(code, 0, "model show failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["name"], "SleepCalculator");
    assert_eq!(parsed["features"].as_array().unwrap().len(), 3);
}

#[test]
fn test_model_show_missing_file_fails() {
    let (_stdout, stderr, code) = run_cli(&["model", "show", "--model", "/nonexistent/m.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to load model"));
}

#[test]
fn test_config_get() {
    let (_stdout, _stderr, code) = run_cli(&["config", "get", "form.live_preview"]);
    assert_eq!(code, 0, "Config get failed");
}

#[test]
fn test_config_get_unknown_key() {
    let (_stdout, stderr, code) = run_cli(&["config", "get", "form.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let (_stdout, stderr, code) = run_cli(&["config", "set", "form.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_list() {
    let (stdout, _stderr, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed.get("defaults").is_some());
}

#[test]
fn test_config_unset_rejects_unknown_key() {
    let (_stdout, stderr, code) = run_cli(&["config", "unset", "form.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_path() {
    let (stdout, stderr, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed: {stderr}");
    let path = stdout.trim();
    assert!(path.ends_with("config.toml"), "unexpected path: {path}");
    assert!(path.contains("betterrest-dev"));
}

#[test]
fn test_form_session() {
    let mut child = cli()
        .args(["form", "--clock", "24h", "--model", "/nonexistent/m.json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"sleep +\ncalculate\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Desired amount of sleep:"));
    assert!(stdout.contains(&format!("Error\n{ERROR_MESSAGE}\n")));
}
