//! Payday anchor
//!
//! The day of month on which salary is assumed to arrive. Every period starts
//! on the anchor, clamped to the last day of months that are too short.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PaydayError, PaydayResult};

/// A validated day-of-month in `1..=31`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PaydayAnchor(u32);

impl PaydayAnchor {
    pub const MIN_DAY: u32 = 1;
    pub const MAX_DAY: u32 = 31;

    /// Anchor on the 1st: periods are plain calendar months
    pub const CALENDAR_MONTH: PaydayAnchor = PaydayAnchor(1);

    /// Validate a day-of-month.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn new(day: u32) -> PaydayResult<Self> {
        if (Self::MIN_DAY..=Self::MAX_DAY).contains(&day) {
            Ok(Self(day))
        } else {
            Err(PaydayError::invalid_argument(format!(
                "payday anchor must be between {} and {}, got {}",
                Self::MIN_DAY,
                Self::MAX_DAY,
                day
            )))
        }
    }

    pub const fn day(&self) -> u32 {
        self.0
    }

    /// The anchor day that applies in the given month.
    ///
    /// `None` when the month lies outside chrono's representable range.
    pub fn effective_day(&self, year: i32, month: u32) -> Option<u32> {
        days_in_month(year, month).map(|days| self.0.min(days))
    }

    /// Date of the anchor in the given month, after clamping.
    ///
    /// `None` only when the month lies outside chrono's representable range.
    pub fn occurrence(&self, year: i32, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, self.effective_day(year, month)?)
    }
}

impl Default for PaydayAnchor {
    fn default() -> Self {
        Self::CALENDAR_MONTH
    }
}

impl TryFrom<u32> for PaydayAnchor {
    type Error = PaydayError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<PaydayAnchor> for u32 {
    fn from(anchor: PaydayAnchor) -> Self {
        anchor.0
    }
}

impl FromStr for PaydayAnchor {
    type Err = PaydayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day: u32 = s.trim().parse().map_err(|_| {
            PaydayError::invalid_argument(format!("payday anchor must be a day of month, got '{}'", s))
        })?;
        Self::new(day)
    }
}

impl fmt::Display for PaydayAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of days in a month: the last day chrono accepts for it
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        assert_eq!(PaydayAnchor::new(1).unwrap().day(), 1);
        assert_eq!(PaydayAnchor::new(31).unwrap().day(), 31);
        assert!(PaydayAnchor::new(0).unwrap_err().is_invalid_argument());
        assert!(PaydayAnchor::new(32).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_default_is_first_of_month() {
        assert_eq!(PaydayAnchor::default(), PaydayAnchor::CALENDAR_MONTH);
        assert_eq!(PaydayAnchor::default().day(), 1);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_effective_day_clamps_to_month_length() {
        let anchor = PaydayAnchor::new(31).unwrap();
        assert_eq!(anchor.effective_day(2024, 2), Some(29));
        assert_eq!(anchor.effective_day(2024, 4), Some(30));
        assert_eq!(PaydayAnchor::new(15).unwrap().effective_day(2023, 2), Some(15));
    }

    #[test]
    fn test_occurrence_clamps() {
        let anchor = PaydayAnchor::new(31).unwrap();
        assert_eq!(
            anchor.occurrence(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            anchor.occurrence(2023, 2),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(
            anchor.occurrence(2024, 4),
            NaiveDate::from_ymd_opt(2024, 4, 30)
        );
        assert_eq!(
            anchor.occurrence(2024, 5),
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );
    }

    #[test]
    fn test_parse_and_serde() {
        let anchor: PaydayAnchor = "25".parse().unwrap();
        assert_eq!(anchor.day(), 25);
        assert!("abc".parse::<PaydayAnchor>().is_err());

        assert_eq!(serde_json::to_string(&anchor).unwrap(), "25");
        assert!(serde_json::from_str::<PaydayAnchor>("0").is_err());
    }
}
