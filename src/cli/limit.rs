//! Spending limit CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, CommandContext};
use crate::display::{format_limit_list, format_limit_statuses, format_money};
use crate::error::PaydayResult;
use crate::models::PeriodType;
use crate::services::{CategoryService, CreateLimitInput, LimitService, UpdateLimitInput};

#[derive(Subcommand)]
pub enum LimitCommands {
    /// Create a spending limit
    Add {
        /// Maximum spending per window
        amount: String,
        /// daily, weekly, or monthly (monthly follows your payday)
        #[arg(short, long, default_value = "monthly")]
        period: PeriodType,
        /// Limit one expense category instead of all spending
        #[arg(short, long)]
        category: Option<String>,
        /// Count spending from this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
    },

    /// List limits
    List,

    /// Edit a limit
    Edit {
        /// Limit ID (or unique prefix)
        id: String,
        /// New maximum spending per window
        #[arg(short, long)]
        amount: Option<String>,
        /// daily, weekly, or monthly
        #[arg(short, long)]
        period: Option<PeriodType>,
        /// Limit this expense category instead
        #[arg(short, long, conflicts_with = "all_categories")]
        category: Option<String>,
        /// Apply the limit to all spending
        #[arg(long)]
        all_categories: bool,
        /// Count spending from this date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
    },

    /// Delete a limit
    Delete {
        /// Limit ID (or unique prefix)
        id: String,
    },

    /// Show spending against every limit
    Check {
        /// Only show exceeded limits
        #[arg(long)]
        violations: bool,
    },
}

pub fn handle_limit_command(ctx: &CommandContext, cmd: LimitCommands) -> PaydayResult<()> {
    let service = LimitService::new(ctx.storage, ctx.settings.week_start());
    let names = CategoryService::new(ctx.storage).names(&ctx.user)?;

    match cmd {
        LimitCommands::Add {
            amount,
            period,
            category,
            start,
        } => {
            let start_date = start.as_deref().map(parse_date).transpose()?;
            let limit = service.create(
                &ctx.user,
                CreateLimitInput {
                    period_type: period,
                    amount: parse_amount(&amount)?,
                    category,
                    start_date,
                },
                ctx.today,
            )?;
            println!(
                "Created {} limit of {} (ID: {})",
                limit.period_type.to_string().to_lowercase(),
                format_money(limit.amount, ctx.symbol()),
                limit.id
            );
        }

        LimitCommands::List => {
            let limits = service.list(&ctx.user)?;
            print!("{}", format_limit_list(&limits, &names, ctx.symbol()));
        }

        LimitCommands::Edit {
            id,
            amount,
            period,
            category,
            all_categories,
            start,
        } => {
            let category = if all_categories {
                Some(None)
            } else {
                category.map(Some)
            };
            let limit = service.update(
                &ctx.user,
                &id,
                UpdateLimitInput {
                    period_type: period,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    category,
                    start_date: start.as_deref().map(parse_date).transpose()?,
                },
            )?;
            println!(
                "Updated {} limit of {} (ID: {})",
                limit.period_type.to_string().to_lowercase(),
                format_money(limit.amount, ctx.symbol()),
                limit.id
            );
        }

        LimitCommands::Delete { id } => {
            let limit = service.delete(&ctx.user, &id)?;
            println!("Deleted limit {}", limit.id);
        }

        LimitCommands::Check { violations } => {
            let statuses = if violations {
                service.check_violations(&ctx.user, ctx.today)?
            } else {
                service.check(&ctx.user, ctx.today)?
            };
            if violations && statuses.is_empty() {
                println!("No limits exceeded.");
            } else {
                print!("{}", format_limit_statuses(&statuses, &names, ctx.symbol()));
            }
        }
    }

    Ok(())
}
