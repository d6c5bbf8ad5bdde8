//! Bay configuration file I/O.
//!
//! This module centralizes all bay file operations so the CLI and TUI handle
//! paths, error messages and atomic writes consistently. Bay files are TOML.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::BAY_FILE_EXTENSION;
use crate::models::BayConfig;

/// Service for loading and saving bay configuration files.
pub struct BayFileService;

impl BayFileService {
    /// Loads a bay configuration from a TOML file.
    ///
    /// The stored total height is kept as-is; use [`Self::load_reconciled`]
    /// when the caller wants the derived value to win (the interactive
    /// editor does, headless validation does not).
    pub fn load(path: &Path) -> Result<BayConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read bay file: {}", path.display()))?;
        let config: BayConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse bay file: {}", path.display()))?;
        Ok(config)
    }

    /// Loads a bay configuration and reconciles the derived total height.
    pub fn load_reconciled(path: &Path) -> Result<BayConfig> {
        let mut config = Self::load(path)?;
        config.reconcile_total_height();
        Ok(config)
    }

    /// Saves a bay configuration using an atomic write.
    ///
    /// Uses the temp file + rename pattern so the file is never left in a
    /// corrupted state.
    pub fn save(config: &BayConfig, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(config).context("Failed to serialize bay configuration")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let temp_path = path.with_extension(format!("{BAY_FILE_EXTENSION}.tmp"));
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp bay file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp bay file to: {}", path.display()))?;

        Ok(())
    }

    /// Default filename for a bay configuration, derived from its name.
    #[must_use]
    pub fn default_file_name(config: &BayConfig) -> String {
        format!(
            "{}.{}",
            sanitize_filename(&config.metadata.name),
            BAY_FILE_EXTENSION
        )
    }
}

/// Sanitizes a bay name for use as a filename: lowercase, spaces to
/// underscores, anything non-alphanumeric dropped.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if sanitized.is_empty() {
        "bay".to_string()
    } else {
        sanitized
    }
}

/// Sanitized path for a bay file in `dir`.
#[must_use]
pub fn bay_file_path(dir: &Path, config: &BayConfig) -> PathBuf {
    dir.join(BayFileService::default_file_name(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("group_a.toml");
        let config = BayConfig::new("Group A").unwrap();

        BayFileService::save(&config, &path).unwrap();
        let loaded = BayFileService::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = BayFileService::load(&temp.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(BayFileService::load(&path).is_err());
    }

    #[test]
    fn test_load_reconciled_fixes_total_height() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stale.toml");
        let mut config = BayConfig::new("Group A").unwrap();
        BayFileService::save(&config, &path).unwrap();

        // Corrupt the stored height on disk
        let text = std::fs::read_to_string(&path)
            .unwrap()
            .replace("total_height = 1908.0", "total_height = 2000.0");
        std::fs::write(&path, text).unwrap();

        let stale = BayFileService::load(&path).unwrap();
        assert!(!stale.validation_report().is_valid());

        let reconciled = BayFileService::load_reconciled(&path).unwrap();
        config.reconcile_total_height();
        assert!((reconciled.total_height - config.total_height).abs() < 1e-9);
        assert!(reconciled.validation_report().is_valid());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Group A"), "group_a");
        assert_eq!(sanitize_filename("  Aisle 9 / West  "), "aisle_9__west");
        assert_eq!(sanitize_filename("***"), "bay");
    }

    #[test]
    fn test_default_file_name() {
        let config = BayConfig::new("Group A").unwrap();
        assert_eq!(BayFileService::default_file_name(&config), "group_a.toml");
    }
}
