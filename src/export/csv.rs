//! CSV export of transactions
//!
//! One row per transaction: `Date,Category,Type,Amount,Description`, newest
//! first, optionally restricted to a period.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{PaydayError, PaydayResult};
use crate::models::{CategoryId, Period, Transaction, UserId};
use crate::services::{CategoryService, TransactionFilter, TransactionService};
use crate::storage::Storage;

pub const CSV_HEADER: [&str; 5] = ["Date", "Category", "Type", "Amount", "Description"];

/// Export a user's transactions to CSV, returning the number of rows written
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    user: &UserId,
    period: Option<Period>,
    writer: W,
) -> PaydayResult<usize> {
    let category_names = CategoryService::new(storage).names(user)?;

    let mut filter = TransactionFilter::new();
    if let Some(period) = period {
        filter = filter.period(period);
    }
    let transactions = TransactionService::new(storage).list(user, &filter)?;

    write_transactions_csv(&transactions, &category_names, writer)?;
    tracing::debug!(user = %user, rows = transactions.len(), "exported transactions to csv");
    Ok(transactions.len())
}

/// Write already-selected transactions as CSV
pub fn write_transactions_csv<W: Write>(
    transactions: &[Transaction],
    category_names: &HashMap<CategoryId, String>,
    writer: W,
) -> PaydayResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for txn in transactions {
        let category = category_names
            .get(&txn.category_id)
            .map(String::as_str)
            .unwrap_or("Unknown");

        let date = txn.date.format("%Y-%m-%d").to_string();
        let kind = txn.kind.to_string();
        let amount = txn.amount.to_string();

        csv_writer.write_record([
            date.as_str(),
            category,
            kind.as_str(),
            amount.as_str(),
            txn.description.as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| PaydayError::Export(e.to_string()))
}
