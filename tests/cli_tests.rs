//! Command-line behaviour of the depwalk binary

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn depwalk(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_depwalk"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn test_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_depwalk"))
}

#[test]
fn test_no_arguments_is_an_error() {
    let output = depwalk(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_help_exits_cleanly() {
    let output = depwalk(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("--copy"));
}

#[test]
fn test_missing_input_file() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nothing.exe");
    let output = depwalk(&[missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("depwalk.toml");
    fs::write(&config, "[resolver]\nsearch_path_var = \"\"\n").unwrap();
    let binary = test_binary();
    let output = depwalk(&[
        binary.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_json_report_on_own_binary() {
    let binary = test_binary();
    let output = depwalk(&[binary.to_str().unwrap(), "--report", "json", "--system"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let root = value["root"].as_str().unwrap();
    assert!(root.starts_with("depwalk"));
    assert_eq!(value["modules"][0]["name"], root);
    assert_eq!(value["modules"][0]["valid"], true);
}

#[test]
fn test_size_report_is_default() {
    let binary = test_binary();
    let output = depwalk(&[binary.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Total: "));
}

#[test]
fn test_unparsable_input_still_reports() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("notes.dll");
    fs::write(&input, b"plain text, not a binary").unwrap();
    let output = depwalk(&[input.to_str().unwrap(), "--report", "tree"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "notes.dll (INVALID!)\n"
    );
}
