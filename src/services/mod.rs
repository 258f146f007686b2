//! Service layer for payday-ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, payday period arithmetic, and aggregation.

pub mod category;
pub mod limit;
pub mod period;
pub mod settings;
pub mod source;
pub mod summary;
pub mod target;
pub mod transaction;

pub use category::{CategoryService, NewCategory, UpdateCategory};
pub use limit::{CreateLimitInput, LimitService, UpdateLimitInput};
pub use period::PeriodCalculator;
pub use settings::PaydaySettingsService;
pub use source::TransactionSource;
pub use summary::{CategoryTotal, PeriodSummary, SummaryService, TrendPoint};
pub use target::{CreateTargetInput, TargetService, UpdateTargetInput};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
