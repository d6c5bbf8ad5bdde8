//! Shared CLI error handling and response types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by CLI commands, each mapping to an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// File system or serialization failure
    Io(String),
    /// The input failed validation
    Validation(String),
    /// The command was invoked incorrectly
    Usage(String),
}

impl CliError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 1,
            Self::Io(_) | Self::Usage(_) => 2,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) | Self::Validation(message) | Self::Usage(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Per-check status in a validation response ("passed", "warning", "failed").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationChecks {
    /// Widths, counts and thicknesses
    pub dimensions: String,
    /// Bin heights and the total height derivation
    pub heights: String,
}

impl ValidationChecks {
    /// All checks start as passed.
    #[must_use]
    pub fn all_passed() -> Self {
        Self {
            dimensions: "passed".to_string(),
            heights: "passed".to_string(),
        }
    }
}

/// One finding in a validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// "error" or "warning"
    pub severity: String,
    /// Human-readable message
    pub message: String,
}

/// JSON-serializable result of `bayline validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// True when no errors were found
    pub valid: bool,
    /// All findings, errors first
    pub errors: Vec<ValidationMessage>,
    /// Per-check status summary
    pub checks: ValidationChecks,
}
