//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer.

pub mod category;
pub mod dashboard;
pub mod export;
pub mod limit;
pub mod payday;
pub mod period;
pub mod target;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use dashboard::{handle_dashboard, DashboardArgs};
pub use export::{handle_export, ExportArgs};
pub use limit::{handle_limit_command, LimitCommands};
pub use payday::{handle_payday_command, PaydayCommands};
pub use period::{handle_period_command, PeriodCommands};
pub use target::{handle_target_command, TargetCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::error::{PaydayError, PaydayResult};
use crate::models::{Money, UserId};
use crate::storage::Storage;

/// Everything a command handler needs
pub struct CommandContext<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub user: UserId,
    /// Reference date for "current period" questions
    pub today: NaiveDate,
}

impl<'a> CommandContext<'a> {
    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Parse a user-entered amount such as "1,250.50" or "$20"
pub fn parse_amount(input: &str) -> PaydayResult<Money> {
    Money::parse(input).map_err(|e| {
        PaydayError::Validation(format!(
            "Invalid amount '{}'. Use a format like '1250.50' or '20'. Error: {}",
            input, e
        ))
    })
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(input: &str) -> PaydayResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PaydayError::Validation(format!(
            "Invalid date format: '{}'. Use YYYY-MM-DD",
            input
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50").unwrap().cents(), 125050);
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").unwrap_err().is_validation());
        assert!(parse_date("29/02/2024").is_err());
    }
}
