//! payday-ledger - personal finance tracking around payday periods
//!
//! Most people are paid once a month on a fixed day, so "this month's
//! spending" really means "spending since the last payday". This crate
//! records income and expenses per user and reports them over
//! payday-anchored periods instead of calendar months.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup for the binary
//! - `models`: Core data models (payday anchor, periods, transactions, ...)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic, including the payday period calculator
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `payday` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use payday_ledger::services::PeriodCalculator;
//!
//! let calculator = PeriodCalculator::for_day(25)?;
//! let period = calculator.current_period(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())?;
//! assert_eq!(period.label(), "Dec 25 - Jan 24, 2024");
//! # Ok::<(), payday_ledger::PaydayError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PaydayError, PaydayResult};
