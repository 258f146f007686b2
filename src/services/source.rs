//! Transaction lookups by period
//!
//! Aggregations (dashboard summaries, trends, limit checks, target progress)
//! only need "a user's transactions inside a date range". Keeping that behind
//! a trait lets them run against the JSON repository or an in-memory slice.

use crate::error::PaydayResult;
use crate::models::{Period, Transaction, UserId};
use crate::storage::TransactionRepository;

pub trait TransactionSource {
    /// The user's transactions dated inside `period` (inclusive)
    fn transactions_in(&self, user: &UserId, period: &Period) -> PaydayResult<Vec<Transaction>>;
}

impl TransactionSource for TransactionRepository {
    fn transactions_in(&self, user: &UserId, period: &Period) -> PaydayResult<Vec<Transaction>> {
        self.filter_for_user(user, |txn| period.contains(txn.date))
    }
}

impl TransactionSource for [Transaction] {
    fn transactions_in(&self, user: &UserId, period: &Period) -> PaydayResult<Vec<Transaction>> {
        Ok(self
            .iter()
            .filter(|txn| &txn.user_id == user && period.contains(txn.date))
            .cloned()
            .collect())
    }
}

impl TransactionSource for Vec<Transaction> {
    fn transactions_in(&self, user: &UserId, period: &Period) -> PaydayResult<Vec<Transaction>> {
        self.as_slice().transactions_in(user, period)
    }
}
