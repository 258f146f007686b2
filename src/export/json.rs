//! JSON export of everything a user owns
//!
//! Categories, transactions, limits, targets, and the payday anchor in one
//! versioned document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PaydayResult;
use crate::models::{Category, Limit, Target, Transaction, UserId};
use crate::services::PaydaySettingsService;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub user_id: UserId,
    pub payday_date: u32,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub limits: Vec<Limit>,
    pub targets: Vec<Target>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl UserExport {
    pub fn from_storage(storage: &Storage, user: &UserId) -> PaydayResult<Self> {
        let payday_date = PaydaySettingsService::new(storage).get_anchor(user)?.day();
        let categories = storage.categories.list_for_user(user)?;
        let mut transactions = storage.transactions.list_for_user(user)?;
        transactions.sort_by_key(|t| (t.date, t.created_at));
        let limits = storage.limits.list_for_user(user)?;
        let targets = storage.targets.list_for_user(user)?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            earliest_transaction: transactions.first().map(|t| t.date.to_string()),
            latest_transaction: transactions.last().map(|t| t.date.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id: user.clone(),
            payday_date,
            categories,
            transactions,
            limits,
            targets,
            metadata,
        })
    }
}

/// Write a user's data as JSON
pub fn export_user_json<W: Write>(
    storage: &Storage,
    user: &UserId,
    writer: &mut W,
    pretty: bool,
) -> PaydayResult<UserExport> {
    let export = UserExport::from_storage(storage, user)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;

    Ok(export)
}
