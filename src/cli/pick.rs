//! Pick-path planning command.

use crate::cli::common::{CliError, CliResult};
use crate::pickpath;
use clap::Args;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Sort bin locations into a serpentine walking pick sequence
#[derive(Debug, Clone, Args)]
pub struct PickArgs {
    /// File of newline-separated bin locations (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the sequence as CSV to this file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Output the sequence as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Keep every aisle in ascending order instead of alternating direction
    #[arg(long)]
    pub no_serpentine: bool,
}

impl PickArgs {
    /// Execute the pick command
    pub fn execute(&self) -> CliResult<()> {
        let input = self.read_input()?;
        let plan = pickpath::plan_pick_path(&input, !self.no_serpentine);

        for warning in &plan.warnings {
            eprintln!(
                "⚠ Line {}: skipped '{}': {}",
                warning.line, warning.content, warning.reason
            );
        }

        if plan.stops.is_empty() {
            return Err(CliError::validation("No valid bin locations found in input"));
        }

        if let Some(ref csv_path) = self.csv {
            let file = fs::File::create(csv_path)
                .map_err(|e| CliError::io(format!("Failed to create CSV file: {e}")))?;
            plan.write_csv(file)
                .map_err(|e| CliError::io(format!("Failed to write CSV: {e}")))?;
            println!("✓ Wrote pick sequence to: {}", csv_path.display());
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&plan)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if self.csv.is_none() {
            print!("{}", plan.format_table());
            println!(
                "\n✓ {} stops across {} aisles",
                plan.stops.len(),
                plan.aisle_count()
            );
        }

        Ok(())
    }

    /// Reads the input file, or stdin when no file was given.
    fn read_input(&self) -> CliResult<String> {
        match &self.input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read {}: {e}", path.display()))),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| CliError::io(format!("Failed to read stdin: {e}")))?;
                Ok(buffer)
            }
        }
    }
}
