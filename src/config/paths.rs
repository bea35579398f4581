//! Path management for the ledger CLI
//!
//! The ledger file itself is always named on the command line; this module
//! only locates the configuration directory.
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGER_CLI_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/ledger-cli` on Linux,
//!    `~/Library/Application Support/ledger-cli` on macOS,
//!    `%APPDATA%\ledger-cli\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "LEDGER_CLI_CONFIG_DIR";

/// Manages the paths used by the ledger CLI
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    config_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, LedgerError> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "ledger-cli")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { config_dir })
    }

    /// Use a custom config directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
