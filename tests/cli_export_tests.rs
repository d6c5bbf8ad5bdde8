//! End-to-end tests for `bayline export` command.

use std::fs;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the bayline binary
fn bayline_bin() -> &'static str {
    env!("CARGO_BIN_EXE_bayline")
}

#[test]
fn test_export_svg() {
    let bay = test_bay_basic();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let output_path = temp_dir.path().join("diagram.svg");

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--format",
            "svg",
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Export should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output_path.exists());

    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("<svg"), "Output should be an SVG document");
    // 2 panels + 6 shelf boards + 2 bays x 4 cols x 5 rows bins
    assert_eq!(svg.matches("<rect").count(), 48);
    assert!(svg.contains("#4A90E2"), "Bay color should be used for fills");
}

#[test]
fn test_export_png_signature() {
    let bay = test_bay_basic();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let output_path = temp_dir.path().join("diagram.png");

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let bytes = fs::read(&output_path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "PNG magic bytes");
}

#[test]
fn test_export_pptx_is_zip_package() {
    let bay = test_bay_basic();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let output_path = temp_dir.path().join("diagram.pptx");

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--format",
            "pptx",
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let bytes = fs::read(&output_path).unwrap();
    assert_eq!(&bytes[..2], b"PK", "PPTX is a zip package");
}

#[test]
fn test_export_format_inferred_from_extension() {
    let bay = test_bay_basic();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let output_path = temp_dir.path().join("inferred.png");

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("png"), "Should report the inferred format");
}

#[test]
fn test_export_rejects_unknown_format() {
    let bay = test_bay_basic();
    let (bay_path, _temp_dir) = create_temp_bay_file(&bay);

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--format",
            "pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Unknown format is a usage error");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pdf"), "Error should name the bad format");
}

#[test]
fn test_export_invalid_bay_fails_validation() {
    let bay = test_bay_stale_height();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let output_path = temp_dir.path().join("never.svg");

    let output = Command::new(bayline_bin())
        .args([
            "export",
            "--bay",
            bay_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(1),
        "Invalid geometry should fail before rendering"
    );
    assert!(!output_path.exists(), "No partial output should be written");
}

#[test]
fn test_export_png_custom_scale() {
    let bay = test_bay_basic();
    let (bay_path, temp_dir) = create_temp_bay_file(&bay);
    let small = temp_dir.path().join("small.png");
    let large = temp_dir.path().join("large.png");

    for (path, scale) in [(&small, "0.2"), (&large, "0.5")] {
        let output = Command::new(bayline_bin())
            .args([
                "export",
                "--bay",
                bay_path.to_str().unwrap(),
                "--output",
                path.to_str().unwrap(),
                "--scale",
                scale,
            ])
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
    }

    let small_len = fs::metadata(&small).unwrap().len();
    let large_len = fs::metadata(&large).unwrap().len();
    assert!(
        large_len > small_len,
        "Higher scale should produce a larger image ({large_len} vs {small_len})"
    );
}
