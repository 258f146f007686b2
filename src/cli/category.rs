//! Category CLI commands

use clap::Subcommand;

use super::CommandContext;
use crate::display::{format_category_details, format_category_list};
use crate::error::PaydayResult;
use crate::models::TransactionKind;
use crate::services::{CategoryService, NewCategory, UpdateCategory};

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: TransactionKind,
        /// Emoji or icon shown before the name
        #[arg(long)]
        icon: Option<String>,
        /// Display color (#rrggbb)
        #[arg(long)]
        color: Option<String>,
    },

    /// List categories
    List {
        /// Only income or only expense categories
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
    },

    /// Rename, restyle, or retype a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// income or expense (only while the category is unused)
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionKind>,
        /// New icon (empty to remove)
        #[arg(long)]
        icon: Option<String>,
        /// New color as #rrggbb (empty to remove)
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a category with no transactions or limits
    Delete {
        /// Category name or ID
        category: String,
    },
}

pub fn handle_category_command(ctx: &CommandContext, cmd: CategoryCommands) -> PaydayResult<()> {
    let service = CategoryService::new(ctx.storage);

    match cmd {
        CategoryCommands::Add {
            name,
            kind,
            icon,
            color,
        } => {
            let category = service.create(
                &ctx.user,
                NewCategory {
                    name,
                    kind,
                    icon,
                    color,
                },
            )?;
            println!("Created category");
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::List { kind } => {
            let categories = service.list(&ctx.user, kind)?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
            icon,
            color,
        } => {
            let updated = service.update(
                &ctx.user,
                &category,
                UpdateCategory {
                    name,
                    kind,
                    icon,
                    color,
                },
            )?;
            println!("Updated category");
            print!("{}", format_category_details(&updated));
        }

        CategoryCommands::Delete { category } => {
            let deleted = service.delete(&ctx.user, &category)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
