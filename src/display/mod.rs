//! Display formatting for terminal output
//!
//! Turns models and service results into tables and text blocks for the
//! CLI. Nothing here reads storage.

pub mod category;
pub mod limit;
pub mod period;
pub mod report;
pub mod summary;
pub mod transaction;

pub use category::{format_category_details, format_category_list};
pub use limit::{format_limit_list, format_limit_statuses, format_target_list, format_target_progress};
pub use period::{format_period_check, format_period_history, format_period_overview};
pub use report::{format_money, ordinal};
pub use summary::{format_summary, format_trend};
pub use transaction::{format_transaction_details, format_transaction_table};
