//! Core data models
//!
//! The payday anchor and period value objects, plus the records a user
//! keeps: categories, transactions, limits, and targets.

pub mod anchor;
pub mod category;
pub mod ids;
pub mod limit;
pub mod money;
pub mod period;
pub mod target;
pub mod transaction;

pub use anchor::PaydayAnchor;
pub use category::Category;
pub use ids::{CategoryId, LimitId, TargetId, TransactionId, UserId};
pub use limit::{Limit, LimitStatus};
pub use money::Money;
pub use period::{LabeledPeriod, Period, PeriodSelection, PeriodType};
pub use target::{Target, TargetKind, TargetProgress};
pub use transaction::{Transaction, TransactionKind};
