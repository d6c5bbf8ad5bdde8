//! End-to-end tests for `bayline validate` command.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the bayline binary
fn bayline_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bayline")
}

#[test]
fn test_validate_valid_bay() {
    let bay = test_bay_basic();
    let (bay_path, _temp_dir) = create_temp_bay_file(&bay);

    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", bay_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid bay should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("✓") || stdout.contains("passed"),
        "Output should indicate success"
    );
}

#[test]
fn test_validate_valid_bay_json() {
    let bay = test_bay_basic();
    let (bay_path, _temp_dir) = create_temp_bay_file(&bay);

    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", bay_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["valid"], true, "Should be valid");
    assert_eq!(result["errors"].as_array().unwrap().len(), 0);
    assert_eq!(result["checks"]["dimensions"], "passed");
    assert_eq!(result["checks"]["heights"], "passed");
}

#[test]
fn test_validate_stale_total_height() {
    let bay = test_bay_stale_height();
    let (bay_path, _temp_dir) = create_temp_bay_file(&bay);

    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", bay_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(1),
        "A stale total height is a validation failure"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["checks"]["heights"], "failed");

    let errors = result["errors"].as_array().unwrap();
    assert!(
        errors
            .iter()
            .any(|e| e["message"].as_str().unwrap().contains("total_height")),
        "Error should name the stale field: {errors:?}"
    );
}

#[test]
fn test_validate_warning_passes_unless_strict() {
    let bay = test_bay_narrow_bins();
    let (bay_path, _temp_dir) = create_temp_bay_file(&bay);

    // Warnings alone still pass
    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", bay_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "Warnings should not fail a normal run. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Strict mode turns them into failures
    let strict = Command::new(bayline_bin())
        .args([
            "validate",
            "--bay",
            bay_path.to_str().unwrap(),
            "--strict",
        ])
        .output()
        .expect("Failed to execute command");
    assert_eq!(strict.status.code(), Some(1), "Strict mode fails on warnings");
}

#[test]
fn test_validate_missing_file() {
    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", "/nonexistent/bay.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Missing file is an I/O error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("✗"), "Error should go to stderr");
}

#[test]
fn test_validate_malformed_toml() {
    let (path, _temp_dir) = create_temp_text_file("broken.toml", "num_bays = [not toml");

    let output = Command::new(bayline_bin())
        .args(["validate", "--bay", path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
