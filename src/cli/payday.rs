//! Payday setting CLI commands

use clap::Subcommand;

use super::CommandContext;
use crate::display::ordinal;
use crate::error::PaydayResult;
use crate::services::PaydaySettingsService;

#[derive(Subcommand)]
pub enum PaydayCommands {
    /// Show the payday day-of-month
    Get,

    /// Set the payday day-of-month (1-31; short months use their last day)
    Set {
        /// Day of the month
        day: u32,
    },
}

pub fn handle_payday_command(ctx: &CommandContext, cmd: PaydayCommands) -> PaydayResult<()> {
    let service = PaydaySettingsService::new(ctx.storage);

    match cmd {
        PaydayCommands::Get => {
            let anchor = service.get_anchor(&ctx.user)?;
            println!("Payday: {} of each month", ordinal(anchor.day()));
        }

        PaydayCommands::Set { day } => {
            let anchor = service.set_anchor(&ctx.user, day)?;
            let period = service.calculator_for(&ctx.user)?.current_period(ctx.today)?;
            println!("Payday set to the {} of each month", ordinal(anchor.day()));
            println!("Current period: {}", period.label());
        }
    }

    Ok(())
}
