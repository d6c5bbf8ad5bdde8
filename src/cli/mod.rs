//! CLI command handlers for Bayline.
//!
//! This module provides headless, scriptable access to Bayline's core
//! functionality for automation, testing, and CI integration.

pub mod common;
pub mod export;
pub mod new;
pub mod pick;
pub mod validate;

// Re-export types used by main.rs
pub use common::{CliError, CliResult};
pub use export::ExportArgs;
pub use new::NewArgs;
pub use pick::PickArgs;
pub use validate::ValidateArgs;
