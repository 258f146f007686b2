//! Period summaries and trends
//!
//! The dashboard view: income, expense, and balance for one period, expense
//! totals per category, and a trend across the last N payday periods. The
//! trend takes `historical_periods` output and performs one independent
//! lookup per period.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::PaydayResult;
use crate::models::{CategoryId, LabeledPeriod, Money, Period, UserId};
use crate::services::period::PeriodCalculator;
use crate::services::source::TransactionSource;

/// Expense total for one category within a period
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub total: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: Period,
    pub income: Money,
    pub expense: Money,
    pub balance: Money,
    pub transaction_count: usize,
    /// Largest first
    pub expense_by_category: Vec<CategoryTotal>,
}

/// One point of the income/expense trend
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub period: LabeledPeriod,
    /// Start of the period ("Dec 25"), the original chart axis label
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

impl TrendPoint {
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

pub struct SummaryService<'a, S: TransactionSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: TransactionSource + ?Sized> SummaryService<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn summarize(&self, user: &UserId, period: &Period) -> PaydayResult<PeriodSummary> {
        let transactions = self.source.transactions_in(user, period)?;

        let mut income = Vec::new();
        let mut expense = Vec::new();
        let mut by_category: HashMap<CategoryId, Vec<Money>> = HashMap::new();

        for txn in &transactions {
            if txn.is_income() {
                income.push(txn.amount);
            } else {
                expense.push(txn.amount);
                by_category.entry(txn.category_id).or_default().push(txn.amount);
            }
        }
        let income = Money::total(income)?;
        let expense = Money::total(expense)?;

        let mut expense_by_category = by_category
            .into_iter()
            .map(|(category_id, amounts)| {
                Ok(CategoryTotal {
                    category_id,
                    transaction_count: amounts.len(),
                    total: Money::total(amounts)?,
                })
            })
            .collect::<PaydayResult<Vec<CategoryTotal>>>()?;
        expense_by_category.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category_id.as_uuid().cmp(b.category_id.as_uuid()))
        });

        Ok(PeriodSummary {
            period: *period,
            income,
            expense,
            balance: income - expense,
            transaction_count: transactions.len(),
            expense_by_category,
        })
    }

    /// Income and expense for each of the last `count` periods, oldest first
    pub fn trend(
        &self,
        user: &UserId,
        calculator: &PeriodCalculator,
        count: usize,
        reference: NaiveDate,
    ) -> PaydayResult<Vec<TrendPoint>> {
        let periods = calculator.historical_periods_at(count, reference)?;
        tracing::debug!(user = %user, count = periods.len(), "computing trend");

        periods
            .into_iter()
            .map(|labeled| {
                let summary = self.summarize(user, &labeled.period)?;
                Ok(TrendPoint {
                    label: labeled.period.short_label(),
                    period: labeled,
                    income: summary.income,
                    expense: summary.expense,
                })
            })
            .collect()
    }
}
