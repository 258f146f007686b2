//! Transaction display formatting

use std::collections::HashMap;

use tabled::Tabled;

use super::report::{format_money, render_table, truncate};
use crate::models::{CategoryId, Transaction};

const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format transactions as a register table; expenses show as negative
pub fn format_transaction_table(
    transactions: &[Transaction],
    category_names: &HashMap<CategoryId, String>,
    symbol: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format(date_format).to_string(),
        category: category_names
            .get(&txn.category_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string()),
        amount: format_money(txn.signed_amount(), symbol),
        description: truncate(&txn.description, DESCRIPTION_WIDTH),
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category_name: Option<&str>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", format_money(txn.amount, symbol)));
    output.push_str(&format!(
        "Category:    {}\n",
        category_name.unwrap_or("Unknown")
    ));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind, UserId};
    use chrono::NaiveDate;

    fn lunch() -> (Transaction, HashMap<CategoryId, String>) {
        let category = CategoryId::new();
        let txn = Transaction::new(
            UserId::default(),
            category,
            TransactionKind::Expense,
            Money::from_cents(125050),
            NaiveDate::from_ymd_opt(2024, 1, 26).unwrap(),
        )
        .with_description("team lunch");
        (txn, HashMap::from([(category, "Food".to_string())]))
    }

    #[test]
    fn test_table_signs_expenses() {
        let (txn, names) = lunch();
        let output = format_transaction_table(&[txn], &names, "$", "%d/%m/%Y");
        assert!(output.contains("26/01/2024"));
        assert!(output.contains("-$1,250.50"));
        assert!(output.contains("Food"));
        assert!(output.contains("team lunch"));
    }

    #[test]
    fn test_details() {
        let (txn, _) = lunch();
        let output = format_transaction_details(&txn, Some("Food"), "$");
        assert!(output.contains("Amount:      $1,250.50"));
        assert!(output.contains("Type:        expense"));
    }
}
