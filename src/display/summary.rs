//! Dashboard formatting: period summary block and trend table

use std::collections::HashMap;

use tabled::Tabled;

use super::report::{format_bar, format_money, format_percentage, render_table, separator};
use crate::models::{CategoryId, PeriodSelection};
use crate::services::{PeriodSummary, TrendPoint};

const WIDTH: usize = 44;
const BAR_WIDTH: usize = 16;

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

/// Income, expense, balance, and per-category spending for one period
pub fn format_summary(
    selection: PeriodSelection,
    summary: &PeriodSummary,
    category_names: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", selection, summary.period.label()));
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("  {:<12}{:>20}\n", "Income", format_money(summary.income, symbol)));
    output.push_str(&format!("  {:<12}{:>20}\n", "Expense", format_money(summary.expense, symbol)));
    output.push_str(&format!("  {:<12}{:>20}\n", "Balance", format_money(summary.balance, symbol)));
    output.push_str(&format!("  {:<12}{:>20}\n", "Transactions", summary.transaction_count));

    if !summary.expense_by_category.is_empty() {
        output.push_str("\nSpending by category\n");
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for entry in &summary.expense_by_category {
            let name = category_names
                .get(&entry.category_id)
                .map(String::as_str)
                .unwrap_or("Unknown");
            let share = entry.total.percentage_of(summary.expense);
            output.push_str(&format!(
                "  {:<16}{:>14}  {} {}\n",
                name,
                format_money(entry.total, symbol),
                format_bar(share, 100.0, BAR_WIDTH),
                format_percentage(share)
            ));
        }
    }

    output
}

/// Income and expense per historical period, oldest first
pub fn format_trend(trend: &[TrendPoint], symbol: &str) -> String {
    if trend.is_empty() {
        return String::new();
    }

    let rows = trend.iter().map(|point| TrendRow {
        label: point.label.clone(),
        income: format_money(point.income, symbol),
        expense: format_money(point.expense, symbol),
        net: format_money(point.net(), symbol),
    });

    let mut output = String::from("Trend\n");
    output.push_str(&render_table(rows));
    output.push('\n');
    output
}
