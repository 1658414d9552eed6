//! Binary end-to-end tests
//!
//! Run the compiled `spoolsuite` binary and check stdout, stderr and exit codes.

use crate::common::{binary, write_config};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(binary())
        .args(["--no-color", "--log-file", "none"])
        .args(args)
        .env("XDG_CONFIG_HOME", "/nonexistent/spoolsuite-test-config")
        .output()
        .expect("spawn spoolsuite")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_default_run_succeeds() {
    let output = run(&[]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "{}", text);
    assert!(text.contains("Ran 9 tests in "), "{}", text);
    assert!(text.contains("\nOK"), "{}", text);
}

#[test]
fn test_verbose_run_lists_each_method() {
    let output = run(&["-v", "-k", "harness"]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("test_declared_order (harness) ... ok"), "{}", text);
    assert!(text.contains("Ran 5 tests in "));
}

#[test]
fn test_filter_selects_methods() {
    let output = run(&["-k", "harness", "-t", "*order*"]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("Ran 1 test in "), "{}", text);
}

#[test]
fn test_unknown_case_exits_with_usage_error() {
    let output = run(&["-k", "filament"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown test case 'filament'"), "{}", stderr);
}

#[test]
fn test_fatal_error_reaches_stderr_when_logging_to_file() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("spoolsuite.log");
    let output = Command::new(binary())
        .arg("--no-color")
        .arg("--log-file")
        .arg(&log_path)
        .args(["-k", "filament"])
        .env("XDG_CONFIG_HOME", "/nonexistent/spoolsuite-test-config")
        .output()
        .expect("spawn spoolsuite");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown test case 'filament'"), "{}", stderr);
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("FATAL: Unknown test case 'filament'"), "{}", log);
}

#[test]
fn test_list_shows_registered_cases() {
    let output = run(&["--list"]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(text.contains("environment"));
    assert!(text.contains("harness"));
    assert!(!text.contains("Ran "));
}

#[test]
fn test_json_format() {
    let output = run(&["--format", "json", "-k", "harness"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tests_run"], 5);
    assert_eq!(value["successful"], true);
}

#[test]
fn test_config_file_selects_cases() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "cases = [\"environment\"]\nverbosity = 2\n");
    let output = run(&["-c", path.to_str().unwrap()]);
    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "{}", text);
    assert!(text.contains("test_monotonic_clock (environment) ..."), "{}", text);
    assert!(!text.contains("(harness)"));
}

#[test]
fn test_missing_config_file_exits_with_usage_error() {
    let output = run(&["-c", "/nonexistent/spoolsuite.toml"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "{}", stderr);
}

#[test]
fn test_version_flag() {
    let output = run(&["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}
