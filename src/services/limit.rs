//! Spending limit service
//!
//! A limit caps expenses over a daily, weekly, or monthly window, either
//! overall or for one expense category. Monthly windows follow the user's
//! payday period, so "this month" means "since the last payday".

use chrono::{NaiveDate, Weekday};

use crate::error::{PaydayError, PaydayResult};
use crate::models::{
    CategoryId, Limit, LimitStatus, Money, Period, PeriodType, TransactionKind, UserId,
};
use crate::services::category::CategoryService;
use crate::services::settings::PaydaySettingsService;
use crate::services::source::TransactionSource;
use crate::storage::Storage;

/// Input for creating a limit
#[derive(Debug, Clone)]
pub struct CreateLimitInput {
    pub period_type: PeriodType,
    pub amount: Money,
    /// Expense category name or id; `None` limits all spending
    pub category: Option<String>,
    /// Defaults to the start of the current window
    pub start_date: Option<NaiveDate>,
}

/// Changes to an existing limit; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateLimitInput {
    pub period_type: Option<PeriodType>,
    pub amount: Option<Money>,
    /// `Some(None)` widens the limit to all spending
    pub category: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
}

/// Service for spending limits
pub struct LimitService<'a> {
    storage: &'a Storage,
    week_start: Weekday,
}

impl<'a> LimitService<'a> {
    pub fn new(storage: &'a Storage, week_start: Weekday) -> Self {
        Self {
            storage,
            week_start,
        }
    }

    pub fn create(
        &self,
        user: &UserId,
        input: CreateLimitInput,
        reference: NaiveDate,
    ) -> PaydayResult<Limit> {
        let category_id = self.expense_category(user, input.category.as_deref())?;

        let start_date = match input.start_date {
            Some(date) => date,
            None => {
                let calculator = PaydaySettingsService::new(self.storage).calculator_for(user)?;
                calculator
                    .window(input.period_type, self.week_start, reference)?
                    .start()
            }
        };

        let limit = Limit::new(
            user.clone(),
            input.period_type,
            input.amount,
            category_id,
            start_date,
        );
        limit.validate()?;

        self.storage.limits.upsert(limit.clone())?;
        self.storage.limits.save()?;

        tracing::info!(
            user = %user,
            id = %limit.id,
            period_type = %limit.period_type,
            amount = limit.amount.cents(),
            "limit created"
        );
        Ok(limit)
    }

    /// Update a limit
    pub fn update(
        &self,
        user: &UserId,
        reference: &str,
        input: UpdateLimitInput,
    ) -> PaydayResult<Limit> {
        let mut limit = self.find(user, reference)?;

        if let Some(period_type) = input.period_type {
            limit.period_type = period_type;
        }
        if let Some(amount) = input.amount {
            limit.amount = amount;
        }
        if let Some(category) = input.category {
            limit.category_id = self.expense_category(user, category.as_deref())?;
        }
        if let Some(start_date) = input.start_date {
            limit.start_date = start_date;
        }
        limit.validate()?;

        self.storage.limits.upsert(limit.clone())?;
        self.storage.limits.save()?;

        tracing::info!(
            user = %user,
            id = %limit.id,
            period_type = %limit.period_type,
            amount = limit.amount.cents(),
            "limit updated"
        );
        Ok(limit)
    }

    /// The user's limits, newest first
    pub fn list(&self, user: &UserId) -> PaydayResult<Vec<Limit>> {
        let mut limits = self.storage.limits.list_for_user(user)?;
        limits.reverse();
        Ok(limits)
    }

    pub fn delete(&self, user: &UserId, reference: &str) -> PaydayResult<Limit> {
        let limit = self.find(user, reference)?;

        self.storage.limits.delete(limit.id)?;
        self.storage.limits.save()?;

        tracing::info!(user = %user, id = %limit.id, "limit deleted");
        Ok(limit)
    }

    fn find(&self, user: &UserId, reference: &str) -> PaydayResult<Limit> {
        self.storage
            .limits
            .find_by_reference(user, reference)?
            .ok_or_else(|| PaydayError::limit_not_found(reference))
    }

    /// Resolve a category reference, which must name an expense category
    fn expense_category(&self, user: &UserId, reference: Option<&str>) -> PaydayResult<Option<CategoryId>> {
        let Some(reference) = reference else {
            return Ok(None);
        };
        let category = CategoryService::new(self.storage).require(user, reference)?;
        if category.kind != TransactionKind::Expense {
            return Err(PaydayError::Validation(format!(
                "Limits apply to expense categories; '{}' is an income category",
                category.name
            )));
        }
        Ok(Some(category.id))
    }

    /// Status of every limit for the window containing `reference`
    pub fn check(&self, user: &UserId, reference: NaiveDate) -> PaydayResult<Vec<LimitStatus>> {
        let calculator = PaydaySettingsService::new(self.storage).calculator_for(user)?;
        let limits = self.list(user)?;

        let mut statuses = Vec::with_capacity(limits.len());
        for limit in &limits {
            let window = calculator.window(limit.period_type, self.week_start, reference)?;
            let spending = spending_for(&self.storage.transactions, user, limit, window)?;
            let status = LimitStatus::new(limit, window, spending);

            if status.is_violated {
                tracing::warn!(
                    user = %user,
                    id = %limit.id,
                    spent = status.current_spending.cents(),
                    amount = status.amount.cents(),
                    "limit exceeded"
                );
            }
            statuses.push(status);
        }
        Ok(statuses)
    }

    /// Only the limits currently violated
    pub fn check_violations(
        &self,
        user: &UserId,
        reference: NaiveDate,
    ) -> PaydayResult<Vec<LimitStatus>> {
        Ok(self
            .check(user, reference)?
            .into_iter()
            .filter(|status| status.is_violated)
            .collect())
    }
}

/// Expenses counted against `limit` within `window`
pub fn spending_for<S: TransactionSource + ?Sized>(
    source: &S,
    user: &UserId,
    limit: &Limit,
    window: Period,
) -> PaydayResult<Money> {
    let Some(counted) = window.starting_from(limit.start_date) else {
        return Ok(Money::zero());
    };

    Money::total(
        source
            .transactions_in(user, &counted)?
            .iter()
            .filter(|txn| txn.is_expense())
            .filter(|txn| limit.category_id.map_or(true, |c| txn.category_id == c))
            .map(|txn| txn.amount),
    )
}
