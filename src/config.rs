//! Configuration for mapcdb
//!
//! Centralized reader configuration with sensible defaults.

use std::path::PathBuf;

/// Largest window a single mapping covers by default (2 GiB - 1).
pub const DEFAULT_WINDOW_SIZE: u64 = i32::MAX as u64;

/// Smallest accepted window: one slot or directory entry.
pub const MIN_WINDOW_SIZE: u64 = 16;

/// Reader configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Configuration
    // -------------------------------------------------------------------------
    /// Path of the database file to open
    pub path: PathBuf,

    // -------------------------------------------------------------------------
    // Mapping Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of bytes covered by one mapped window
    pub window_size: u64,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Check every directory entry against the file bounds on open
    pub verify_directory: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data.cdb"),
            window_size: DEFAULT_WINDOW_SIZE,
            verify_directory: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the maximum window size (in bytes)
    pub fn window_size(mut self, size: u64) -> Self {
        self.config.window_size = size;
        self
    }

    /// Enable or disable directory bounds checks on open
    pub fn verify_directory(mut self, verify: bool) -> Self {
        self.config.verify_directory = verify;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
