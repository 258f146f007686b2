//! Payday period display formatting

use chrono::NaiveDate;
use tabled::Tabled;

use super::report::{ordinal, render_table};
use crate::error::PaydayResult;
use crate::models::{LabeledPeriod, Period};
use crate::services::PeriodCalculator;

#[derive(Tabled)]
struct PeriodRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    days: i64,
    #[tabled(rename = "")]
    marker: &'static str,
}

/// Current, previous, and next periods around `reference`
pub fn format_period_overview(
    calculator: &PeriodCalculator,
    reference: NaiveDate,
) -> PaydayResult<String> {
    let current = calculator.current_period(reference)?;
    let previous = calculator.previous_period(reference)?;
    let next = calculator.next_period(reference)?;

    let mut output = String::new();
    if calculator.anchor().day() == 1 {
        output.push_str("Payday: 1st (calendar months)\n");
    } else {
        output.push_str(&format!(
            "Payday: {} of each month\n",
            ordinal(calculator.anchor().day())
        ));
    }
    output.push_str(&format!("Current period: {}\n", current.label()));
    output.push_str(&format!(
        "Day {} of {}, {} left\n\n",
        (reference - current.start()).num_days() + 1,
        current.num_days(),
        days_phrase((current.end() - reference).num_days())
    ));

    let rows = [
        ("Last", previous, ""),
        ("Current", current, "◀"),
        ("Next", next, ""),
    ]
    .into_iter()
    .map(|(name, period, marker)| period_row(name.to_string(), &period, marker));
    output.push_str(&render_table(rows));
    output.push('\n');

    Ok(output)
}

/// Historical periods, oldest first, as a table
pub fn format_period_history(periods: &[LabeledPeriod]) -> String {
    if periods.is_empty() {
        return "No periods.\n".to_string();
    }

    let rows = periods.iter().map(|labeled| {
        let marker = if labeled.periods_ago == 0 { "◀" } else { "" };
        period_row(labeled.label.clone(), &labeled.period, marker)
    });

    let mut output = render_table(rows);
    output.push('\n');
    output
}

/// Whether `date` falls in `period`
pub fn format_period_check(date: NaiveDate, period: &Period) -> String {
    if period.contains(date) {
        format!("{} is within {}\n", date, period.label())
    } else {
        format!("{} is outside {}\n", date, period.label())
    }
}

fn period_row(label: String, period: &Period, marker: &'static str) -> PeriodRow {
    PeriodRow {
        label,
        start: period.start().to_string(),
        end: period.end().to_string(),
        days: period.num_days(),
        marker,
    }
}

fn days_phrase(days: i64) -> String {
    match days {
        0 => "last day".to_string(),
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    }
}
