//! End-to-end tests for `bayline pick` command.

use std::io::Write;
use std::process::{Command, Stdio};

mod fixtures;
use fixtures::*;

/// Path to the bayline binary
fn bayline_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bayline")
}

/// Runs `bayline pick` with the given extra args, feeding `input` on stdin.
fn run_pick(input: &str, args: &[&str]) -> std::process::Output {
    let mut child = Command::new(bayline_bin())
        .arg("pick")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .as_mut()
        .expect("stdin available")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

#[test]
fn test_pick_serpentine_order_json() {
    let output = run_pick(sample_pick_locations(), &["--json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let plan: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON");
    let stops = plan["stops"].as_array().unwrap();

    let sequence: Vec<&str> = stops
        .iter()
        .map(|s| s["raw"].as_str().unwrap())
        .collect();
    // Aisle 8 ascends, aisle 9 is walked back in reverse
    assert_eq!(
        sequence,
        vec![
            "W08_110_A",
            "W08-112-B",
            "W08-113-A",
            "W08-115-A",
            "W09-021-C",
            "W09-020-A",
            "W09-019-B",
        ]
    );

    // Sequence numbers are contiguous from 1
    for (index, stop) in stops.iter().enumerate() {
        assert_eq!(stop["sequence"].as_u64(), Some(index as u64 + 1));
    }
}

#[test]
fn test_pick_no_serpentine_keeps_ascending_order() {
    let output = run_pick(sample_pick_locations(), &["--json", "--no-serpentine"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let sequence: Vec<&str> = plan["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["raw"].as_str().unwrap())
        .collect();
    assert_eq!(
        sequence,
        vec![
            "W08_110_A",
            "W08-112-B",
            "W08-113-A",
            "W08-115-A",
            "W09-019-B",
            "W09-020-A",
            "W09-021-C",
        ]
    );
}

#[test]
fn test_pick_warns_about_malformed_lines() {
    let output = run_pick(sample_pick_locations(), &[]);
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("AISLE 9 SLOT 4"), "Should warn about line 4");
    assert!(stderr.contains("not-a-location"), "Should warn about line 9");
    // Blank lines are skipped silently
    assert_eq!(stderr.matches('⚠').count(), 2);
}

#[test]
fn test_pick_table_output() {
    let output = run_pick("W08-113-A\nW08-112-B\n", &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Seq"), "Table should have a header");
    assert!(stdout.contains("W08-112-B"));
    assert!(
        stdout.contains("2 stops across 1 aisles"),
        "Summary line expected, got: {stdout}"
    );
}

#[test]
fn test_pick_reads_input_file() {
    let (path, _temp_dir) = create_temp_text_file("locations.txt", "W03-001-A\nW03-002-B\n");

    let output = Command::new(bayline_bin())
        .args(["pick", "--input", path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let plan: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(plan["stops"].as_array().unwrap().len(), 2);
}

#[test]
fn test_pick_writes_csv() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("sequence.csv");

    let output = run_pick(
        "W08-113-A\nW08-112-B\n",
        &["--csv", csv_path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("sequence,location,aisle,position,level")
    );
    assert_eq!(lines.next(), Some("1,W08-112-B,8,112,B"));
    assert_eq!(lines.next(), Some("2,W08-113-A,8,113,A"));
}

#[test]
fn test_pick_empty_input_fails() {
    let output = run_pick("\nnot-a-location\n", &[]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "No usable locations is a validation error"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No valid bin locations"));
}
