//! Diagram exporters.
//!
//! Every exporter consumes the same [`BayDrawing`](crate::geometry::BayDrawing)
//! rectangle list; this module picks the renderer from an [`ExportFormat`]
//! and owns the shared output-path conventions.

pub mod pptx;
pub mod png;
pub mod svg;

use crate::geometry::BayDrawing;
use crate::models::BayConfig;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format for a bay diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Scalable vector graphics
    #[default]
    Svg,
    /// Raster image
    Png,
    /// PowerPoint slide deck with editable shapes
    Pptx,
}

impl ExportFormat {
    /// File extension (without the dot).
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pptx => "pptx",
        }
    }

    /// Infers the format from an output path's extension, if recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.to_ascii_lowercase().parse().ok()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pptx" => Ok(Self::Pptx),
            other => anyhow::bail!("Unknown export format '{other}'. Expected svg, png or pptx"),
        }
    }
}

/// Renders a bay drawing to `path` in the given format.
///
/// `png_scale` overrides the PNG pixels-per-millimetre factor; the other
/// formats ignore it.
///
/// # Errors
///
/// Returns an error if rendering or writing the file fails.
pub fn render_to_file(
    config: &BayConfig,
    drawing: &BayDrawing,
    format: ExportFormat,
    path: &Path,
    png_scale: Option<f64>,
) -> Result<()> {
    match format {
        ExportFormat::Svg => svg::write_svg(config, drawing, path),
        ExportFormat::Png => png::write_png(config, drawing, path, png_scale),
        ExportFormat::Pptx => pptx::write_pptx(config, drawing, path),
    }
}

/// Default output filename: `<bay_name>_<date>.<ext>` in the current
/// directory, with the name lowercased and spaces replaced.
#[must_use]
pub fn default_output_path(config: &BayConfig, format: ExportFormat) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let name = config.metadata.name.replace(' ', "_").to_lowercase();
    PathBuf::from(format!("{}_{}.{}", name, date, format.extension()))
}
