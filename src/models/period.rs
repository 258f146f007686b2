//! Period value objects
//!
//! A [`Period`] is an inclusive date range. Periods are derived on demand by
//! `services::period` and never persisted on their own.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PaydayError, PaydayResult};

/// An inclusive date range `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Create a period, rejecting ranges whose end precedes their start
    pub fn new(start: NaiveDate, end: NaiveDate) -> PaydayResult<Self> {
        if end < start {
            return Err(PaydayError::invalid_argument(format!(
                "period end {} is before its start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// A single-day period
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive containment: `start <= date <= end`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The day after this period ends, if representable
    pub fn following_day(&self) -> Option<NaiveDate> {
        self.end.checked_add_days(Days::new(1))
    }

    /// Narrow the period so it starts no earlier than `date`.
    ///
    /// Returns `None` when `date` falls after the period.
    pub fn starting_from(&self, date: NaiveDate) -> Option<Self> {
        if date > self.end {
            None
        } else {
            Some(Self {
                start: self.start.max(date),
                end: self.end,
            })
        }
    }

    /// Display label such as "Dec 25 - Jan 24, 2024"
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %d"),
            self.end.format("%b %d, %Y")
        )
    }

    /// Short label of the start date ("Dec 25"), used on trend axes
    pub fn short_label(&self) -> String {
        self.start.format("%b %d").to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A period enumerated for trend reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPeriod {
    pub period: Period,
    pub label: String,
    /// How many periods before the current one (0 = current)
    pub periods_ago: usize,
}

impl LabeledPeriod {
    pub fn new(period: Period, periods_ago: usize) -> Self {
        Self {
            label: period.label(),
            period,
            periods_ago,
        }
    }
}

/// Which payday period a dashboard is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSelection {
    #[default]
    Current,
    Previous,
}

impl FromStr for PeriodSelection {
    type Err = PaydayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" | "this" | "now" => Ok(Self::Current),
            "last" | "previous" | "prev" => Ok(Self::Previous),
            other => Err(PaydayError::Validation(format!(
                "Unknown period '{}': expected 'current' or 'last'",
                other
            ))),
        }
    }
}

impl fmt::Display for PeriodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "Current Period"),
            Self::Previous => write!(f, "Last Period"),
        }
    }
}

/// Cadence of a limit or target window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl FromStr for PeriodType {
    type Err = PaydayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            other => Err(PaydayError::Validation(format!(
                "Unknown period type '{}': expected daily, weekly or monthly",
                other
            ))),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
        }
    }
}
