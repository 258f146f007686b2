//! Savings and spending target CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, CommandContext};
use crate::display::{format_money, format_target_list, format_target_progress};
use crate::error::PaydayResult;
use crate::models::{PeriodType, TargetKind};
use crate::services::{CreateTargetInput, TargetService, UpdateTargetInput};

#[derive(Subcommand)]
pub enum TargetCommands {
    /// Create a savings or spending target
    Add {
        /// savings or spending
        kind: TargetKind,
        /// Target amount per window
        amount: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
        /// daily, weekly, or monthly (calendar month)
        #[arg(short, long, default_value = "monthly")]
        period: PeriodType,
    },

    /// List targets, nearest deadline first
    List,

    /// Edit a target
    Edit {
        /// Target ID (or unique prefix)
        id: String,
        /// savings or spending
        #[arg(short = 't', long = "type")]
        kind: Option<TargetKind>,
        /// New target amount per window
        #[arg(short, long)]
        amount: Option<String>,
        /// New deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        /// daily, weekly, or monthly
        #[arg(short, long)]
        period: Option<PeriodType>,
    },

    /// Delete a target
    Delete {
        /// Target ID (or unique prefix)
        id: String,
    },

    /// Show progress towards every target
    Progress,
}

pub fn handle_target_command(ctx: &CommandContext, cmd: TargetCommands) -> PaydayResult<()> {
    let service = TargetService::new(ctx.storage, ctx.settings.week_start());

    match cmd {
        TargetCommands::Add {
            kind,
            amount,
            deadline,
            period,
        } => {
            let target = service.create(
                &ctx.user,
                CreateTargetInput {
                    kind,
                    amount: parse_amount(&amount)?,
                    period_type: period,
                    deadline: parse_date(&deadline)?,
                },
            )?;
            println!(
                "Created {} target of {} by {} (ID: {})",
                target.kind.to_string().to_lowercase(),
                format_money(target.amount, ctx.symbol()),
                target.deadline,
                target.id
            );
        }

        TargetCommands::List => {
            let targets = service.list(&ctx.user)?;
            print!("{}", format_target_list(&targets, ctx.symbol()));
        }

        TargetCommands::Edit {
            id,
            kind,
            amount,
            deadline,
            period,
        } => {
            let target = service.update(
                &ctx.user,
                &id,
                UpdateTargetInput {
                    kind,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    period_type: period,
                    deadline: deadline.as_deref().map(parse_date).transpose()?,
                },
            )?;
            println!(
                "Updated {} target of {} by {} (ID: {})",
                target.kind.to_string().to_lowercase(),
                format_money(target.amount, ctx.symbol()),
                target.deadline,
                target.id
            );
        }

        TargetCommands::Delete { id } => {
            let target = service.delete(&ctx.user, &id)?;
            println!("Deleted target {}", target.id);
        }

        TargetCommands::Progress => {
            let progress = service.progress(&ctx.user, ctx.today)?;
            print!("{}", format_target_progress(&progress, ctx.symbol()));
        }
    }

    Ok(())
}
