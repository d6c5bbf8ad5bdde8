//! Export command for rendering bay diagrams.

use crate::cli::common::{CliError, CliResult};
use crate::export::{self, ExportFormat};
use crate::geometry;
use crate::services::BayFileService;
use clap::Args;
use std::path::PathBuf;

/// Export a bay configuration to an SVG, PNG or PPTX diagram
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to bay configuration file
    #[arg(short, long, value_name = "FILE")]
    pub bay: PathBuf,

    /// Output format: svg, png or pptx (inferred from --output when omitted)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output path (defaults to [bay_name]_[date].[ext])
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// PNG scale in pixels per millimetre (default fits the long edge to ~1600 px)
    #[arg(long, value_name = "PX_PER_MM")]
    pub scale: Option<f64>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let config = BayFileService::load(&self.bay)
            .map_err(|e| CliError::io(format!("Failed to load bay file: {e}")))?;

        let format = self.resolve_format()?;

        let drawing = geometry::compute_drawing(&config)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| export::default_output_path(&config, format));

        export::render_to_file(&config, &drawing, format, &output_path, self.scale)
            .map_err(|e| CliError::io(format!("Failed to render {format}: {e}")))?;

        println!("✓ Exported {} diagram to: {}", format, output_path.display());

        Ok(())
    }

    /// Resolves the output format from --format, falling back to the output
    /// extension, then to SVG.
    fn resolve_format(&self) -> CliResult<ExportFormat> {
        if let Some(ref name) = self.format {
            return name
                .parse()
                .map_err(|e: anyhow::Error| CliError::usage(e.to_string()));
        }
        if let Some(ref output) = self.output {
            if let Some(format) = ExportFormat::from_path(output) {
                return Ok(format);
            }
        }
        Ok(ExportFormat::Svg)
    }
}
