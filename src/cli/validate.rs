//! Validation command for bay configuration files.

use crate::cli::common::{
    CliError, CliResult, ValidationChecks, ValidationMessage, ValidationResponse,
};
use crate::models::bay::ValidationIssueKind;
use crate::services::BayFileService;
use clap::Args;
use std::path::PathBuf;

/// Validate a bay configuration file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Path to bay configuration file
    #[arg(short, long, value_name = "FILE")]
    pub bay: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = BayFileService::load(&self.bay)
            .map_err(|e| CliError::io(format!("Failed to load bay file: {e}")))?;

        let report = config.validation_report();

        let mut checks = ValidationChecks::all_passed();
        let mut messages = Vec::new();

        for issue in &report.errors {
            match issue.kind {
                ValidationIssueKind::Dimensions => checks.dimensions = "failed".to_string(),
                ValidationIssueKind::Heights => checks.heights = "failed".to_string(),
            }
            messages.push(ValidationMessage {
                severity: "error".to_string(),
                message: issue.message.clone(),
            });
        }

        for issue in &report.warnings {
            let check = match issue.kind {
                ValidationIssueKind::Dimensions => &mut checks.dimensions,
                ValidationIssueKind::Heights => &mut checks.heights,
            };
            if check == "passed" {
                *check = "warning".to_string();
            }
            messages.push(ValidationMessage {
                severity: "warning".to_string(),
                message: issue.message.clone(),
            });
        }

        let response = ValidationResponse {
            valid: report.is_valid(),
            errors: messages,
            checks,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Dimensions: {}", response.checks.dimensions);
            println!("  Heights:    {}", response.checks.heights);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for message in &response.errors {
                    let prefix = if message.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    println!("{} {}", prefix, message.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict {
            let has_warnings = response.errors.iter().any(|m| m.severity == "warning");
            if has_warnings {
                return Err(CliError::validation("Warnings found in strict mode"));
            }
        }

        Ok(())
    }
}
