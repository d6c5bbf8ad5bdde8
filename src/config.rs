//! Application configuration management.
//!
//! Handles loading, validating, and saving the application configuration in
//! TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::export::ExportFormat;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory where bay files are kept (used by the editor's save default)
    pub bays_dir: Option<PathBuf>,
}

/// User interface preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme preference
    pub theme_mode: ThemeMode,
    /// Show the help overlay the first time the editor opens
    pub show_help_on_startup: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Auto,
            show_help_on_startup: true,
        }
    }
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default output format name ("svg", "png" or "pptx")
    pub default_format: String,
    /// Default PNG scale in pixels per millimetre (None = auto-fit)
    pub png_scale: Option<f64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "svg".to_string(),
            png_scale: None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Export defaults
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific configuration directory.
    ///
    /// - Linux: `~/.config/Bayline/`
    /// - macOS: `~/Library/Application Support/Bayline/`
    /// - Windows: `%APPDATA%\Bayline\`
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("Bayline"))
    }

    /// Path to the configuration file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns true if a configuration file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Loads configuration from the config file, or defaults when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using an atomic write.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks that the bays directory exists when set and that the default
    /// export format is recognized.
    pub fn validate(&self) -> Result<()> {
        if let Some(bays_dir) = &self.paths.bays_dir {
            if !bays_dir.exists() || !bays_dir.is_dir() {
                anyhow::bail!("Bays directory does not exist: {}", bays_dir.display());
            }
        }

        self.export
            .default_format
            .parse::<ExportFormat>()
            .context("Invalid default export format in config")?;

        if let Some(scale) = self.export.png_scale {
            if scale <= 0.0 || !scale.is_finite() {
                anyhow::bail!("png_scale must be a positive number (got {scale})");
            }
        }

        Ok(())
    }

    /// The configured default export format.
    #[must_use]
    pub fn default_export_format(&self) -> ExportFormat {
        self.export.default_format.parse().unwrap_or_default()
    }
}
