//! Dashboard command: period summary, trend, and limit warnings

use clap::Args;

use super::CommandContext;
use crate::display::{format_limit_statuses, format_summary, format_trend};
use crate::error::PaydayResult;
use crate::models::PeriodSelection;
use crate::services::{CategoryService, LimitService, PaydaySettingsService, SummaryService};

#[derive(Args)]
pub struct DashboardArgs {
    /// current or last payday period
    #[arg(short, long, default_value = "current")]
    pub period: PeriodSelection,

    /// Number of periods in the trend (defaults to the configured length)
    #[arg(long)]
    pub trend: Option<usize>,
}

pub fn handle_dashboard(ctx: &CommandContext, args: DashboardArgs) -> PaydayResult<()> {
    let calculator = PaydaySettingsService::new(ctx.storage).calculator_for(&ctx.user)?;
    let names = CategoryService::new(ctx.storage).names(&ctx.user)?;
    let summaries = SummaryService::new(&ctx.storage.transactions);

    let period = calculator.period_for(args.period, ctx.today)?;
    let summary = summaries.summarize(&ctx.user, &period)?;
    print!("{}", format_summary(args.period, &summary, &names, ctx.symbol()));

    let count = args.trend.unwrap_or(ctx.settings.trend_periods);
    let trend = summaries.trend(&ctx.user, &calculator, count, ctx.today)?;
    println!();
    print!("{}", format_trend(&trend, ctx.symbol()));

    let violations = LimitService::new(ctx.storage, ctx.settings.week_start())
        .check_violations(&ctx.user, ctx.today)?;
    if !violations.is_empty() {
        println!();
        println!("Limits exceeded");
        print!("{}", format_limit_statuses(&violations, &names, ctx.symbol()));
    }

    Ok(())
}
