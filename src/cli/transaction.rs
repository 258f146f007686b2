//! Transaction CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date, CommandContext};
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::PaydayResult;
use crate::models::{PeriodSelection, TransactionKind};
use crate::services::{
    CategoryService, CreateTransactionInput, PaydaySettingsService, TransactionFilter,
    TransactionService, UpdateTransactionInput,
};

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record income or an expense
    Add {
        /// Category name or ID; the category decides income vs expense
        category: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Expected type; rejected if the category disagrees
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
    },

    /// List transactions, newest first
    List {
        /// Restrict to the current or last payday period
        #[arg(short, long)]
        period: Option<PeriodSelection>,
        /// Restrict to one category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
        /// Only income or only expenses
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        /// Number of transactions to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (or unique prefix)
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category (name or ID); the type follows the category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description (empty to clear)
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Expected type; rejected if the category disagrees
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (or unique prefix)
        id: String,
    },
}

pub fn handle_transaction_command(ctx: &CommandContext, cmd: TransactionCommands) -> PaydayResult<()> {
    let service = TransactionService::new(ctx.storage);
    let categories = CategoryService::new(ctx.storage);

    match cmd {
        TransactionCommands::Add {
            category,
            amount,
            date,
            description,
            kind,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => ctx.today,
            };
            let txn = service.create(
                &ctx.user,
                CreateTransactionInput {
                    category,
                    amount: parse_amount(&amount)?,
                    date,
                    description,
                    kind,
                },
            )?;

            let names = categories.names(&ctx.user)?;
            println!("Recorded transaction");
            print!(
                "{}",
                format_transaction_details(
                    &txn,
                    names.get(&txn.category_id).map(String::as_str),
                    ctx.symbol()
                )
            );
        }

        TransactionCommands::List {
            period,
            category,
            kind,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(selection) = period {
                let calculator = PaydaySettingsService::new(ctx.storage).calculator_for(&ctx.user)?;
                let period = calculator.period_for(selection, ctx.today)?;
                println!("{}: {}", selection, period.label());
                filter = filter.period(period);
            }
            if let Some(reference) = category {
                filter = filter.category(categories.require(&ctx.user, &reference)?.id);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }

            let transactions = service.list(&ctx.user, &filter)?;
            let names = categories.names(&ctx.user)?;
            print!(
                "{}",
                format_transaction_table(
                    &transactions,
                    &names,
                    ctx.symbol(),
                    &ctx.settings.date_format
                )
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            category,
            date,
            description,
            kind,
        } => {
            let txn = service.update(
                &ctx.user,
                &id,
                UpdateTransactionInput {
                    category,
                    amount: amount.as_deref().map(parse_amount).transpose()?,
                    date: date.as_deref().map(parse_date).transpose()?,
                    description,
                    kind,
                },
            )?;

            let names = categories.names(&ctx.user)?;
            println!("Updated transaction");
            print!(
                "{}",
                format_transaction_details(
                    &txn,
                    names.get(&txn.category_id).map(String::as_str),
                    ctx.symbol()
                )
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = service.delete(&ctx.user, &id)?;
            println!("Deleted transaction {} ({} on {})", txn.id, txn.amount, txn.date);
        }
    }

    Ok(())
}
