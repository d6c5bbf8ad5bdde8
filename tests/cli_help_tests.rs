//! End-to-end tests for help and version output.

use std::process::Command;

/// Path to the bayline binary
fn bayline_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bayline")
}

#[test]
fn test_help_lists_subcommands() {
    let output = Command::new(bayline_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["new", "validate", "export", "pick"] {
        assert!(
            stdout.contains(subcommand),
            "Help should list the {subcommand} subcommand"
        );
    }
}

#[test]
fn test_version_output() {
    let output = Command::new(bayline_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_subcommand_help() {
    for (subcommand, flag) in [
        ("export", "--format"),
        ("validate", "--strict"),
        ("pick", "--no-serpentine"),
        ("new", "--force"),
    ] {
        let output = Command::new(bayline_bin())
            .args([subcommand, "--help"])
            .output()
            .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains(flag),
            "{subcommand} help should document {flag}"
        );
    }
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = Command::new(bayline_bin())
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");

    assert_ne!(output.status.code(), Some(0));
}
