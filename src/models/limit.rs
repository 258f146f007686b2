//! Spending limit model
//!
//! A limit caps spending per daily, weekly, or monthly window, either across
//! all expenses or for one category. A limit is violated once spending in
//! the current window meets or exceeds its amount.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, LimitId, UserId};
use super::money::Money;
use super::period::{Period, PeriodType};
use crate::error::PaydayError;

/// Usage percentage at which a limit is shown as nearly reached
pub const WARNING_PERCENTAGE: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub id: LimitId,
    pub user_id: UserId,
    pub period_type: PeriodType,
    pub amount: Money,

    /// `None` limits total spending
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Spending before this date is never counted
    pub start_date: NaiveDate,

    pub created_at: DateTime<Utc>,
}

impl Limit {
    pub fn new(
        user_id: UserId,
        period_type: PeriodType,
        amount: Money,
        category_id: Option<CategoryId>,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: LimitId::new(),
            user_id,
            period_type,
            amount,
            category_id,
            start_date,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), PaydayError> {
        self.amount.validate_amount("Limit")?;
        Ok(())
    }
}

/// Result of checking one limit against its current window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitStatus {
    pub limit_id: LimitId,
    pub category_id: Option<CategoryId>,
    pub period_type: PeriodType,
    /// Window the spending was summed over
    pub window: Period,
    pub amount: Money,
    pub current_spending: Money,
    pub is_violated: bool,
}

impl LimitStatus {
    pub fn new(limit: &Limit, window: Period, current_spending: Money) -> Self {
        Self {
            limit_id: limit.id,
            category_id: limit.category_id,
            period_type: limit.period_type,
            window,
            amount: limit.amount,
            current_spending,
            is_violated: current_spending >= limit.amount,
        }
    }

    pub fn percentage(&self) -> f64 {
        self.current_spending.percentage_of(self.amount)
    }

    pub fn remaining(&self) -> Money {
        self.amount - self.current_spending
    }

    /// Not yet violated but past the warning threshold
    pub fn is_warning(&self) -> bool {
        !self.is_violated && self.percentage() > WARNING_PERCENTAGE
    }
}
