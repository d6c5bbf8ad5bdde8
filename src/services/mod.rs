//! Shared services used by both the CLI and the TUI.

pub mod bay_files;

pub use bay_files::BayFileService;
