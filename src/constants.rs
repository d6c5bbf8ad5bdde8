//! Application-wide constants.

/// Human-readable application name
pub const APP_NAME: &str = "Bayline";

/// Binary name as invoked from the shell
pub const APP_BINARY_NAME: &str = "bayline";

/// File extension for bay configuration files
pub const BAY_FILE_EXTENSION: &str = "toml";
