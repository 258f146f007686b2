//! Payday period CLI commands

use clap::Subcommand;

use super::{parse_date, CommandContext};
use crate::display::{format_period_check, format_period_history, format_period_overview};
use crate::error::PaydayResult;
use crate::models::PeriodSelection;
use crate::services::PaydaySettingsService;

#[derive(Subcommand)]
pub enum PeriodCommands {
    /// Show the current, last, and next payday periods
    Show {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent payday periods, oldest first
    History {
        /// Number of periods (defaults to the configured trend length)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Check whether a date falls in a payday period
    Check {
        /// Date to check (YYYY-MM-DD)
        date: String,
        /// Which period: current or last
        #[arg(short, long, default_value = "current")]
        period: PeriodSelection,
    },
}

pub fn handle_period_command(ctx: &CommandContext, cmd: PeriodCommands) -> PaydayResult<()> {
    let calculator = PaydaySettingsService::new(ctx.storage).calculator_for(&ctx.user)?;

    match cmd {
        PeriodCommands::Show { date } => {
            let reference = match date {
                Some(date) => parse_date(&date)?,
                None => ctx.today,
            };
            print!("{}", format_period_overview(&calculator, reference)?);
        }

        PeriodCommands::History { count } => {
            let count = count.unwrap_or(ctx.settings.trend_periods);
            let periods = calculator.historical_periods_at(count, ctx.today)?;
            print!("{}", format_period_history(&periods));
        }

        PeriodCommands::Check { date, period } => {
            let date = parse_date(&date)?;
            let period = calculator.period_for(period, ctx.today)?;
            print!("{}", format_period_check(date, &period));
        }
    }

    Ok(())
}
