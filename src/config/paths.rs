//! Path management for payday-ledger
//!
//! ## Path Resolution Order
//!
//! 1. `PAYDAY_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (e.g. `~/.config/payday-ledger` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PaydayError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PAYDAY_DATA_DIR";

/// Manages all paths used by payday-ledger
#[derive(Debug, Clone)]
pub struct PaydayPaths {
    base_dir: PathBuf,
}

impl PaydayPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PaydayError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Application settings (`config.json`)
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn limits_file(&self) -> PathBuf {
        self.data_dir().join("limits.json")
    }

    pub fn targets_file(&self) -> PathBuf {
        self.data_dir().join("targets.json")
    }

    /// Per-user settings such as the payday anchor
    pub fn user_settings_file(&self) -> PathBuf {
        self.data_dir().join("user_settings.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PaydayError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PaydayError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PaydayError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check whether settings have ever been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PaydayError> {
    ProjectDirs::from("", "", "payday-ledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PaydayError::Config("Could not determine a home directory".into()))
}
