//! Export module for payday-ledger
//!
//! - CSV: a user's transactions, optionally for one period (spreadsheet-compatible)
//! - JSON: everything a user owns, for backup or migration

pub mod csv;
pub mod json;

pub use self::csv::{export_transactions_csv, write_transactions_csv, CSV_HEADER};
pub use self::json::{export_user_json, UserExport, EXPORT_SCHEMA_VERSION};
