//! CLI command for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::CommandContext;
use crate::error::{PaydayError, PaydayResult};
use crate::export::{export_transactions_csv, export_user_json};
use crate::models::PeriodSelection;
use crate::services::PaydaySettingsService;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (categories, transactions, limits, targets)
    Json,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only transactions in the current or last payday period (CSV only)
    #[arg(short, long)]
    pub period: Option<PeriodSelection>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn handle_export(ctx: &CommandContext, args: ExportArgs) -> PaydayResult<()> {
    if matches!(args.format, ExportFormat::Json) && args.period.is_some() {
        return Err(PaydayError::Validation(
            "--period only applies to CSV exports".into(),
        ));
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PaydayError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let summary = match args.format {
        ExportFormat::Csv => {
            let period = match args.period {
                Some(selection) => Some(
                    PaydaySettingsService::new(ctx.storage)
                        .calculator_for(&ctx.user)?
                        .period_for(selection, ctx.today)?,
                ),
                None => None,
            };
            let count = export_transactions_csv(ctx.storage, &ctx.user, period, &mut writer)?;
            format!("Exported {} transactions", count)
        }
        ExportFormat::Json => {
            let export = export_user_json(ctx.storage, &ctx.user, &mut writer, args.pretty)?;
            format!(
                "Exported {} categories and {} transactions",
                export.metadata.category_count, export.metadata.transaction_count
            )
        }
    };
    writer.flush()?;

    if let Some(path) = &args.output {
        println!("{} to: {}", summary, path.display());
    }

    Ok(())
}
