//! Savings and spending targets
//!
//! A savings target tracks income received in its window; a spending target
//! tracks expenses. Both carry a deadline after which an unmet target is
//! overdue.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{TargetId, UserId};
use super::money::Money;
use super::period::{Period, PeriodType};
use super::transaction::TransactionKind;
use crate::error::PaydayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Savings,
    Spending,
}

impl TargetKind {
    /// Kind of transaction counted towards this target
    pub fn counted_kind(&self) -> TransactionKind {
        match self {
            Self::Savings => TransactionKind::Income,
            Self::Spending => TransactionKind::Expense,
        }
    }
}

impl FromStr for TargetKind {
    type Err = PaydayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Ok(Self::Savings),
            "spending" | "spend" => Ok(Self::Spending),
            other => Err(PaydayError::Validation(format!(
                "Unknown target type '{}': expected savings or spending",
                other
            ))),
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Savings => write!(f, "Savings"),
            Self::Spending => write!(f, "Spending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub user_id: UserId,
    pub kind: TargetKind,
    pub amount: Money,
    pub period_type: PeriodType,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Target {
    pub fn new(
        user_id: UserId,
        kind: TargetKind,
        amount: Money,
        period_type: PeriodType,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: TargetId::new(),
            user_id,
            kind,
            amount,
            period_type,
            deadline,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), PaydayError> {
        self.amount.validate_amount("Target")?;
        Ok(())
    }
}

/// Progress of a target within its current window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProgress {
    pub target_id: TargetId,
    pub kind: TargetKind,
    pub window: Period,
    pub amount: Money,
    pub current: Money,
    /// Capped at 100
    pub percentage: f64,
    pub is_completed: bool,
    pub is_overdue: bool,
}

impl TargetProgress {
    pub fn new(target: &Target, window: Period, current: Money, today: NaiveDate) -> Self {
        let is_completed = current >= target.amount;
        Self {
            target_id: target.id,
            kind: target.kind,
            window,
            amount: target.amount,
            current,
            percentage: current.percentage_of(target.amount).min(100.0),
            is_completed,
            is_overdue: target.deadline < today && !is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn target() -> Target {
        Target::new(
            UserId::default(),
            TargetKind::Savings,
            Money::from_cents(50000),
            PeriodType::Monthly,
            date(2024, 3, 31),
        )
    }

    fn window() -> Period {
        Period::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap()
    }

    #[test]
    fn test_progress_caps_percentage() {
        let progress = TargetProgress::new(&target(), window(), Money::from_cents(75000), date(2024, 3, 15));
        assert_eq!(progress.percentage, 100.0);
        assert!(progress.is_completed);
        assert!(!progress.is_overdue);
    }

    #[test]
    fn test_overdue_only_when_unmet() {
        let progress = TargetProgress::new(&target(), window(), Money::from_cents(10000), date(2024, 4, 1));
        assert_eq!(progress.percentage, 20.0);
        assert!(progress.is_overdue);

        let on_deadline = TargetProgress::new(&target(), window(), Money::from_cents(10000), date(2024, 3, 31));
        assert!(!on_deadline.is_overdue);
    }

    #[test]
    fn test_validate_amount_bounds() {
        assert!(target().validate().is_ok());

        let mut target = target();
        target.amount = Money::zero();
        assert!(target.validate().unwrap_err().is_validation());
        target.amount = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert!(target.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_counted_kind() {
        assert_eq!(TargetKind::Savings.counted_kind(), TransactionKind::Income);
        assert_eq!(TargetKind::Spending.counted_kind(), TransactionKind::Expense);
    }
}
