//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Commands
//! that need the text-generation service are not covered here.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "routinely-cli", "--"])
        .args(args)
        .env("ROUTINELY_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_routine_show_student() {
    let (stdout, _, code) = run_cli(&["routine", "show", "--profession", "Student"]);
    assert_eq!(code, 0, "routine show failed");
    assert!(stdout.contains("6:30 AM - Wake up and morning routine"));
    assert!(stdout.contains("11:00 PM - Sleep"));
}

#[test]
fn test_routine_show_merges_timed_task() {
    let (stdout, _, code) = run_cli(&[
        "routine",
        "show",
        "--profession",
        "Student",
        "--task",
        "Doctor visit@14:00",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("14:00 PM - Doctor visit"));
}

#[test]
fn test_routine_show_json() {
    let (stdout, _, code) = run_cli(&["routine", "show", "--profession", "Chef", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(!parsed["entries"].as_array().unwrap().is_empty());
}

#[test]
fn test_routine_export_writes_file() {
    let dir = std::env::temp_dir().join("routinely-cli-export-test");
    let _ = std::fs::create_dir_all(&dir);
    let (stdout, _, code) = run_cli(&[
        "routine",
        "export",
        "--profession",
        "Student",
        "--out",
        dir.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Student_Routine.txt"));

    let exported = std::fs::read_to_string(dir.join("Student_Routine.txt")).unwrap();
    assert!(exported.starts_with("6:30 AM - Wake up and morning routine"));
}

#[test]
fn test_extract_from_text() {
    let (stdout, _, code) = run_cli(&[
        "extract",
        "--text",
        "TASKS:\n- 9:00 AM Do X\n\n",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let tasks = parsed.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Do X");
    assert_eq!(tasks[0]["time"], "9:00 AM");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn test_extract_without_marker_is_empty() {
    let (stdout, _, code) = run_cli(&["extract", "--text", "no tasks here"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed.as_array().unwrap().is_empty());
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[gateway]"));
    assert!(stdout.contains("[reminders]"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "gateway.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}
