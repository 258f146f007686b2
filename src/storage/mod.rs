//! Storage layer for payday-ledger
//!
//! JSON file storage with atomic writes. Each record type has its own file
//! under the data directory.

pub mod file_io;
pub mod repository;
pub mod user_settings;

pub use file_io::{read_json, write_json_atomic};
pub use repository::{
    CategoryRepository, JsonRepository, LimitRepository, Record, TargetRepository,
    TransactionRepository,
};
pub use user_settings::{UserSettings, UserSettingsRepository};

use crate::config::paths::PaydayPaths;
use crate::error::PaydayError;

/// Owns every repository for one data directory
pub struct Storage {
    paths: PaydayPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
    pub limits: LimitRepository,
    pub targets: TargetRepository,
    pub user_settings: UserSettingsRepository,
}

impl Storage {
    pub fn new(paths: PaydayPaths) -> Result<Self, PaydayError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            limits: LimitRepository::new(paths.limits_file()),
            targets: TargetRepository::new(paths.targets_file()),
            user_settings: UserSettingsRepository::new(paths.user_settings_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &PaydayPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PaydayError> {
        self.transactions.load()?;
        self.categories.load()?;
        self.limits.load()?;
        self.targets.load()?;
        self.user_settings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PaydayError> {
        self.transactions.save()?;
        self.categories.save()?;
        self.limits.save()?;
        self.targets.save()?;
        self.user_settings.save()?;
        Ok(())
    }
}
