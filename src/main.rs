use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use payday_ledger::cli::{
    handle_category_command, handle_dashboard, handle_export, handle_limit_command,
    handle_payday_command, handle_period_command, handle_target_command,
    handle_transaction_command, CommandContext,
};
use payday_ledger::config::{paths::PaydayPaths, settings::Settings};
use payday_ledger::logging::init_tracing;
use payday_ledger::models::UserId;
use payday_ledger::services::period::today;
use payday_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "payday",
    version,
    about = "Personal finance tracker built around payday periods",
    long_about = "payday tracks income and expenses and reports them per payday \
                  period: from one payday to the day before the next, instead of \
                  by calendar month."
)]
struct Cli {
    /// User whose data to work with (defaults to the configured user)
    #[arg(short, long, global = true, env = "PAYDAY_USER")]
    user: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "PAYDAY_TODAY", hide = true)]
    today: Option<NaiveDate>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Payday period commands
    #[command(subcommand)]
    Period(payday_ledger::cli::PeriodCommands),

    /// Show or set your payday
    #[command(subcommand)]
    Payday(payday_ledger::cli::PaydayCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(payday_ledger::cli::CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(payday_ledger::cli::TransactionCommands),

    /// Spending limit commands
    #[command(subcommand)]
    Limit(payday_ledger::cli::LimitCommands),

    /// Savings and spending target commands
    #[command(subcommand)]
    Target(payday_ledger::cli::TargetCommands),

    /// Summary of a payday period with trend and limit warnings
    Dashboard(payday_ledger::cli::DashboardArgs),

    /// Export data as CSV or JSON
    Export(payday_ledger::cli::ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = PaydayPaths::new()?;
    let settings = Settings::load_or_create(&paths).context("loading settings")?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all().context("loading data")?;

    let user = UserId::new(cli.user.unwrap_or_else(|| settings.default_user.clone()));
    let ctx = CommandContext {
        storage: &storage,
        settings: &settings,
        user,
        today: cli.today.unwrap_or_else(today),
    };
    tracing::debug!(user = %ctx.user, today = %ctx.today, "starting");

    match cli.command {
        Some(Commands::Period(cmd)) => handle_period_command(&ctx, cmd)?,
        Some(Commands::Payday(cmd)) => handle_payday_command(&ctx, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&ctx, cmd)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&ctx, cmd)?,
        Some(Commands::Limit(cmd)) => handle_limit_command(&ctx, cmd)?,
        Some(Commands::Target(cmd)) => handle_target_command(&ctx, cmd)?,
        Some(Commands::Dashboard(args)) => handle_dashboard(&ctx, args)?,
        Some(Commands::Export(args)) => handle_export(&ctx, args)?,
        Some(Commands::Config) => {
            println!("payday configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default user:    {}", settings.default_user);
            println!("  Trend periods:   {}", settings.trend_periods);
            println!("  Week starts on:  {}", settings.week_start());
            println!("  Active user:     {}", ctx.user);
        }
        None => {
            println!("payday - personal finance tracking by payday period");
            println!();
            println!("Run 'payday --help' for usage information.");
            println!("Run 'payday payday set <day>' to set your payday.");
        }
    }

    Ok(())
}
