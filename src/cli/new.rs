//! Command for creating a new bay configuration file.

use crate::cli::common::{CliError, CliResult};
use crate::models::BayConfig;
use crate::services::bay_files::BayFileService;
use clap::Args;
use std::path::PathBuf;

/// Create a new bay configuration file with default dimensions
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Name of the bay group
    #[arg(short, long, value_name = "NAME", default_value = "New Bay Group")]
    pub name: String,

    /// Output path (defaults to a sanitized form of the name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub fn execute(&self) -> CliResult<()> {
        let config = BayConfig::new(&self.name)
            .map_err(|e| CliError::usage(format!("Invalid bay name: {e}")))?;

        let output_path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(BayFileService::default_file_name(&config)));

        if output_path.exists() && !self.force {
            return Err(CliError::usage(format!(
                "{} already exists (use --force to overwrite)",
                output_path.display()
            )));
        }

        BayFileService::save(&config, &output_path)
            .map_err(|e| CliError::io(format!("Failed to write bay file: {e}")))?;

        println!("✓ Created bay configuration: {}", output_path.display());
        println!(
            "  {} bays, {} x {} bins, {:.0} x {:.0} mm",
            config.num_bays,
            config.num_cols,
            config.num_rows,
            config.bay_width,
            config.total_height
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::bay_files::sanitize_filename;

    #[test]
    fn test_default_output_name_is_sanitized() {
        let config = BayConfig::new("Pick Face West").unwrap();
        assert_eq!(
            BayFileService::default_file_name(&config),
            format!("{}.toml", sanitize_filename("Pick Face West"))
        );
    }
}
