//! Transaction model
//!
//! Amounts are always stored positive; the kind says which way money moved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId, UserId};
use super::money::Money;
use crate::error::PaydayError;

/// Direction of a transaction; categories carry one too
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl FromStr for TransactionKind {
    type Err = PaydayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(PaydayError::Validation(format!(
                "Unknown transaction type '{}': expected income or expense",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: UserId,

    pub category_id: CategoryId,

    pub kind: TransactionKind,

    /// Always positive
    pub amount: Money,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: UserId,
        category_id: CategoryId,
        kind: TransactionKind,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            category_id,
            kind,
            amount,
            date,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with expenses negated, for balances
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn validate(&self) -> Result<(), PaydayError> {
        self.amount.validate_amount("Transaction")?;
        if self.description.len() > 200 {
            return Err(PaydayError::Validation(
                "Transaction description is limited to 200 characters".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(cents: i64) -> Transaction {
        Transaction::new(
            UserId::default(),
            CategoryId::new(),
            TransactionKind::Expense,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        )
    }

    #[test]
    fn test_signed_amount() {
        let txn = expense(1250);
        assert!(txn.is_expense());
        assert_eq!(txn.signed_amount().cents(), -1250);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        assert!(expense(0).validate().unwrap_err().is_validation());
        assert!(expense(-1).validate().is_err());
        assert!(expense(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_amount() {
        assert!(expense(Money::MAX_AMOUNT.cents()).validate().is_ok());
        assert!(expense(Money::MAX_AMOUNT.cents() + 1)
            .validate()
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_serialization() {
        let txn = expense(500).with_description("Coffee");
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"expense\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
