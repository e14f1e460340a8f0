//! Fixed keys, versions and defaults shared across the planner.

/// Storage key holding the serialized calendar state.
pub const STORAGE_KEY: &str = "calendar_data";

/// Version discriminator written with every blob.
pub const CURRENT_VERSION: &str = "3.0";

/// How many years before the current one a stored year may be.
pub const YEARS_BEFORE: i32 = 1;

/// How many years after the current one a stored year may be.
pub const YEARS_AFTER: i32 = 5;

/// Prefix of exported file names (`year-planner-data-2025-01-31.json`).
pub const EXPORT_FILE_PREFIX: &str = "year-planner-data";

pub mod default_layer {
    pub const ID: &str = "default";
    pub const NAME: &str = "Default";
}

pub mod config {
    pub const APP_DIR: &str = "yearplan";
    pub const FILENAME: &str = "config.toml";
    pub const ENV_PREFIX: &str = "YEARPLAN";
}
