//! Bayline - Terminal-based warehouse bay designer
//!
//! This library provides core functionality for the Bayline application:
//! editing and validating warehouse bay configurations, computing the bay
//! drawing geometry, rendering exports (SVG, PNG, PPTX), and planning
//! serpentine pick paths from bin-location identifiers.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod geometry;
pub mod models;
pub mod pickpath;
pub mod services;
pub mod tui;
