//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use bayline::models::{BayConfig, BayMetadata, RgbColor};
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a basic valid bay configuration with deterministic metadata.
///
/// Two bays, four columns, five 350 mm rows, the stock defaults otherwise.
pub fn test_bay_basic() -> BayConfig {
    let mut bay = BayConfig::new("Test Group").expect("valid name");
    bay.metadata = deterministic_metadata("Test Group");
    bay
}

/// Creates a bay whose stored total height disagrees with its bin heights,
/// as a hand edit would leave it.
pub fn test_bay_stale_height() -> BayConfig {
    let mut bay = test_bay_basic();
    bay.total_height = 9999.0;
    bay
}

/// Creates a valid bay that triggers the narrow-bin warning.
pub fn test_bay_narrow_bins() -> BayConfig {
    let mut bay = test_bay_basic();
    bay.num_cols = 20;
    bay.reconcile_total_height();
    bay
}

/// Metadata with fixed timestamps so serialized fixtures are reproducible.
fn deterministic_metadata(name: &str) -> BayMetadata {
    let mut metadata = BayMetadata::new(name).expect("valid name");
    metadata.description = "E2E test bay".to_string();
    metadata.author = "Test Suite".to_string();
    metadata.created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    metadata.modified = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
    metadata
}

/// Writes a bay configuration to a TOML file in a fresh temp directory.
///
/// Returns the file path and the `TempDir` guard (keep it alive for the
/// duration of the test).
pub fn create_temp_bay_file(bay: &BayConfig) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test_bay.toml");
    let toml = toml::to_string_pretty(bay).expect("Failed to serialize bay");
    fs::write(&path, toml).expect("Failed to write bay file");
    (path, temp_dir)
}

/// Writes arbitrary text to a file in a fresh temp directory.
pub fn create_temp_text_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write file");
    (path, temp_dir)
}

/// Bin locations spanning two aisles, with facing odd/even positions and a
/// couple of lines that should be skipped.
pub fn sample_pick_locations() -> &'static str {
    "W08-113-A\n\
     W08-112-B\n\
     w08_110_a\n\
     AISLE 9 SLOT 4\n\
     W09-021-C\n\
     \n\
     W09-020-A\n\
     W08-115-A\n\
     not-a-location\n\
     W09-019-B\n"
}

/// The default bay color fixture files use.
pub fn test_color() -> RgbColor {
    RgbColor::new(74, 144, 226)
}
