//! Limit and target display formatting

use std::collections::HashMap;

use tabled::Tabled;

use super::report::{format_bar, format_money, format_percentage, render_table};
use crate::models::{CategoryId, Limit, LimitStatus, Target, TargetProgress};

const BAR_WIDTH: usize = 12;

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Period")]
    period_type: String,
    #[tabled(rename = "Limit")]
    amount: String,
    #[tabled(rename = "Since")]
    start_date: String,
}

#[derive(Tabled)]
struct LimitStatusRow {
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Limit")]
    amount: String,
    #[tabled(rename = "Used")]
    bar: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Period")]
    period_type: String,
    #[tabled(rename = "Target")]
    amount: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
}

#[derive(Tabled)]
struct TargetProgressRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Window")]
    window: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Target")]
    amount: String,
    #[tabled(rename = "Progress")]
    bar: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

fn scope(category_id: Option<CategoryId>, names: &HashMap<CategoryId, String>) -> String {
    match category_id {
        Some(id) => names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string()),
        None => "All spending".to_string(),
    }
}

pub fn format_limit_list(
    limits: &[Limit],
    category_names: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if limits.is_empty() {
        return "No limits set.\n".to_string();
    }

    let rows = limits.iter().map(|limit| LimitRow {
        id: limit.id.to_string(),
        scope: scope(limit.category_id, category_names),
        period_type: limit.period_type.to_string(),
        amount: format_money(limit.amount, symbol),
        start_date: limit.start_date.to_string(),
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

pub fn format_limit_statuses(
    statuses: &[LimitStatus],
    category_names: &HashMap<CategoryId, String>,
    symbol: &str,
) -> String {
    if statuses.is_empty() {
        return "No limits set.\n".to_string();
    }

    let rows = statuses.iter().map(|status| LimitStatusRow {
        scope: scope(status.category_id, category_names),
        window: status.window.label(),
        spent: format_money(status.current_spending, symbol),
        amount: format_money(status.amount, symbol),
        bar: format!(
            "{} {}",
            format_bar(status.percentage(), 100.0, BAR_WIDTH),
            format_percentage(status.percentage())
        ),
        status: if status.is_violated {
            "EXCEEDED"
        } else if status.is_warning() {
            "warning"
        } else {
            "ok"
        },
    });

    let mut output = render_table(rows);
    output.push('\n');

    let violated = statuses.iter().filter(|s| s.is_violated).count();
    if violated > 0 {
        output.push_str(&format!("{} limit(s) exceeded.\n", violated));
    }
    output
}

pub fn format_target_list(targets: &[Target], symbol: &str) -> String {
    if targets.is_empty() {
        return "No targets set.\n".to_string();
    }

    let rows = targets.iter().map(|target| TargetRow {
        id: target.id.to_string(),
        kind: target.kind.to_string(),
        period_type: target.period_type.to_string(),
        amount: format_money(target.amount, symbol),
        deadline: target.deadline.to_string(),
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

pub fn format_target_progress(progress: &[TargetProgress], symbol: &str) -> String {
    if progress.is_empty() {
        return "No targets set.\n".to_string();
    }

    let rows = progress.iter().map(|p| TargetProgressRow {
        kind: p.kind.to_string(),
        window: p.window.label(),
        current: format_money(p.current, symbol),
        amount: format_money(p.amount, symbol),
        bar: format!(
            "{} {}",
            format_bar(p.percentage, 100.0, BAR_WIDTH),
            format_percentage(p.percentage)
        ),
        status: if p.is_completed {
            "completed"
        } else if p.is_overdue {
            "overdue"
        } else {
            "in progress"
        },
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Period, PeriodType, TargetKind, UserId};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_limit_statuses_flag_violations() {
        let food = CategoryId::new();
        let names = HashMap::from([(food, "Food".to_string())]);
        let window = Period::new(date(2024, 1, 25), date(2024, 2, 24)).unwrap();

        let overall = Limit::new(UserId::default(), PeriodType::Monthly, Money::from_cents(10000), None, window.start());
        let scoped = Limit::new(UserId::default(), PeriodType::Monthly, Money::from_cents(10000), Some(food), window.start());
        let statuses = vec![
            LimitStatus::new(&overall, window, Money::from_cents(12000)),
            LimitStatus::new(&scoped, window, Money::from_cents(1000)),
        ];

        let output = format_limit_statuses(&statuses, &names, "$");
        assert!(output.contains("All spending"));
        assert!(output.contains("Food"));
        assert!(output.contains("EXCEEDED"));
        assert!(output.contains("1 limit(s) exceeded."));
    }

    #[test]
    fn test_target_progress_status() {
        let target = Target::new(UserId::default(), TargetKind::Savings, Money::from_cents(1000), PeriodType::Monthly, date(2024, 1, 31));
        let window = Period::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let progress = vec![TargetProgress::new(&target, window, Money::from_cents(250), date(2024, 2, 1))];

        let output = format_target_progress(&progress, "$");
        assert!(output.contains("overdue"));
        assert!(output.contains("25%"));
    }
}
