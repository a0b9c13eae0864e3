//! CLI wiring integration tests
//!
//! Tests end-to-end CLI behavior:
//! - Headless commands (examples, analyze)
//! - state_dir and config resolution
//! - Exit codes
//!
//! All tests run the real binary with a temp state dir. None needs a
//! running backend.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn compilab(state_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_compilab"))
        .arg("--state-dir")
        .arg(state_dir)
        .args(args)
        .env_remove("COMPILAB_BACKEND")
        .env_remove("COMPILAB_HOME")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run compilab binary")
}

#[test]
fn test_examples_lists_catalog() {
    let state_dir = TempDir::new().unwrap();
    let output = compilab(state_dir.path(), &["examples", "--mode", "asm"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(asm)"));
    assert!(stdout.contains("  1. "));
}

#[test]
fn test_logs_go_to_state_dir() {
    let state_dir = TempDir::new().unwrap();
    let output = compilab(state_dir.path(), &["examples"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(state_dir.path().join("compilab.log").exists());
}

#[test]
fn test_missing_state_dir_is_config_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_compilab"))
        .args(["--state-dir", "/nonexistent/compilab/12345", "examples"])
        .output()
        .expect("Failed to run compilab binary");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_backend_is_config_error() {
    let state_dir = TempDir::new().unwrap();
    let output = compilab(
        state_dir.path(),
        &["--backend", "localhost:5000", "analyze", "--example", "1"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("localhost:5000"));
}

#[test]
fn test_broken_config_is_config_error() {
    let state_dir = TempDir::new().unwrap();
    fs::write(state_dir.path().join("config.toml"), "[backend\nurl = ").unwrap();

    let output = compilab(state_dir.path(), &["examples"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_example_out_of_range_fails() {
    let state_dir = TempDir::new().unwrap();
    let output = compilab(state_dir.path(), &["analyze", "--mode", "lex", "--example", "99"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_source_file_fails() {
    let state_dir = TempDir::new().unwrap();
    let missing = state_dir.path().join("nope.txt");
    let output = compilab(
        state_dir.path(),
        &["analyze", missing.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreachable_backend_prints_connectivity_message() {
    let state_dir = TempDir::new().unwrap();
    fs::write(
        state_dir.path().join("config.toml"),
        "[backend]\nurl = \"http://127.0.0.1:1\"\ntimeout_secs = 5\n",
    )
    .unwrap();
    let save_dir = TempDir::new().unwrap();

    let output = compilab(
        state_dir.path(),
        &[
            "analyze",
            "--mode",
            "asm",
            "--example",
            "1",
            "--save",
            save_dir.path().to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No se pudo conectar con el servidor"));
    assert!(stdout.contains("http://127.0.0.1:1"));

    let saved = fs::read_to_string(save_dir.path().join("resultado.txt")).unwrap();
    assert_eq!(saved, stdout);
}

#[test]
fn test_unreachable_backend_json_outcome() {
    let state_dir = TempDir::new().unwrap();
    let output = compilab(
        state_dir.path(),
        &[
            "--backend",
            "http://127.0.0.1:1",
            "analyze",
            "--example",
            "1",
            "--json",
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["outcome"], "transport_error");
}
