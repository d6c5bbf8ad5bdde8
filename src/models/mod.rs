//! Data models for bay configurations and bin locations.

pub mod bay;
pub mod bin_location;
pub mod rgb;

pub use bay::{BayConfig, BayMetadata, ValidationIssue, ValidationIssueKind, ValidationReport};
pub use bin_location::BinLocation;
pub use rgb::RgbColor;
