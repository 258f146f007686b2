//! Application settings for payday-ledger
//!
//! Display preferences and defaults shared by every user of a data
//! directory. The payday anchor itself is per user and lives in
//! `storage::user_settings`.

use chrono::format::{Item, StrftimeItems};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::paths::PaydayPaths;
use crate::error::PaydayError;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// User id used when the command line does not name one
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Number of periods shown in trend reports
    #[serde(default = "default_trend_periods")]
    pub trend_periods: usize,

    /// First day of week (0 = Sunday, 1 = Monday)
    #[serde(default)]
    pub first_day_of_week: u8,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_user() -> String {
    "local".to_string()
}

fn default_trend_periods() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_user: default_user(),
            trend_periods: default_trend_periods(),
            first_day_of_week: 0,
        }
    }
}

impl Settings {
    /// Weekday on which weekly windows start
    pub fn week_start(&self) -> Weekday {
        if self.first_day_of_week == 1 {
            Weekday::Mon
        } else {
            Weekday::Sun
        }
    }

    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &PaydayPaths) -> Result<Self, PaydayError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PaydayError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PaydayError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.trend_periods == 0 {
            return Err(PaydayError::Config(
                "trend_periods must be at least 1".into(),
            ));
        }
        if StrftimeItems::new(&settings.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(PaydayError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                settings.date_format
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PaydayPaths) -> Result<(), PaydayError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PaydayError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PaydayError::Io(format!("Failed to write settings file: {}", e)))?;

        tracing::debug!(path = %paths.settings_file().display(), "settings saved");
        Ok(())
    }
}
