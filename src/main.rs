use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use wallet_ledger::cli::{
    handle_breakdown_command, handle_budget_command, handle_category_command, handle_entry_command,
    handle_history_command, handle_import_command, handle_summary_command,
    handle_transfer_command, BudgetCommands, CategoryCommands, CommandContext,
};
use wallet_ledger::config::{LedgerPaths, Settings};
use wallet_ledger::models::TransactionType;

#[derive(Parser)]
#[command(
    name = "wallet",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance ledger",
    long_about = "Records income, expenses and transfers between accounts, tracks \
                  per-category budgets and reports balances from the command line."
)]
struct Cli {
    /// Account login the command operates on
    #[arg(short, long, global = true, env = "WALLET_ACCOUNT")]
    account: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an income
    Income {
        /// Category name
        category: String,
        /// Amount (e.g., "1000" or "1000,50")
        amount: String,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Record an expense
    Expense {
        /// Category name
        category: String,
        /// Amount (e.g., "25" or "25.90")
        amount: String,
        /// Free-text note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transfer funds to another account
    Transfer {
        /// Recipient login
        recipient: String,
        /// Amount
        amount: String,
        /// Category recorded on both sides
        #[arg(short, long, default_value = "Transfer")]
        category: String,
        /// Create the recipient's wallet if it does not exist yet
        #[arg(long)]
        create_recipient: bool,
    },

    /// Import income and expenses from a delimited file
    Import {
        /// Path to the file (columns: type, category, amount[, note])
        file: PathBuf,
        /// Apply nothing unless every line is valid
        #[arg(long)]
        all_or_nothing: bool,
    },

    /// Show balance, totals, budgets and recent transactions
    Summary,

    /// Show income, expense and budget figures for categories
    Breakdown {
        /// Category names
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// List transactions
    History {
        /// Only show the last N entries
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show the audit journal instead of transactions
        #[arg(long)]
        audit: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    wallet_ledger::init_tracing();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("wallet - personal finance ledger");
        println!();
        println!("Run 'wallet --help' for usage information.");
        return Ok(());
    };

    if let Commands::Config = command {
        println!("Wallet Ledger Configuration");
        println!("===========================");
        println!("Data directory:    {}", paths.base_dir().display());
        println!("Wallets directory: {}", paths.wallets_dir().display());
        println!("Settings file:     {}", paths.settings_file().display());
        println!("Audit log:         {}", paths.audit_log().display());
        println!();
        println!("Settings:");
        println!("  Budget warning threshold: {}", settings.budget_warning_threshold);
        println!("  Low balance threshold:    {}", settings.low_balance_threshold);
        println!("  Import mode:              {:?}", settings.import_mode);
        println!("  Recent transactions:      {}", settings.recent_transaction_count);
        return Ok(());
    }

    let Some(account) = cli.account else {
        bail!("An account is required: pass --account <login> or set WALLET_ACCOUNT");
    };

    let ctx = CommandContext::new(paths, settings)?;

    match command {
        Commands::Income {
            category,
            amount,
            note,
        } => handle_entry_command(
            &ctx,
            &account,
            TransactionType::Income,
            &category,
            &amount,
            note.as_deref(),
        )?,
        Commands::Expense {
            category,
            amount,
            note,
        } => handle_entry_command(
            &ctx,
            &account,
            TransactionType::Expense,
            &category,
            &amount,
            note.as_deref(),
        )?,
        Commands::Budget(cmd) => handle_budget_command(&ctx, &account, cmd)?,
        Commands::Category(cmd) => handle_category_command(&ctx, &account, cmd)?,
        Commands::Transfer {
            recipient,
            amount,
            category,
            create_recipient,
        } => handle_transfer_command(
            &ctx,
            &account,
            &recipient,
            &amount,
            &category,
            create_recipient,
        )?,
        Commands::Import {
            file,
            all_or_nothing,
        } => handle_import_command(&ctx, &account, &file, all_or_nothing)?,
        Commands::Summary => handle_summary_command(&ctx, &account)?,
        Commands::Breakdown { categories } => {
            handle_breakdown_command(&ctx, &account, &categories)?
        }
        Commands::History { limit, audit } => {
            handle_history_command(&ctx, &account, limit, audit)?
        }
        Commands::Config => {}
    }

    Ok(())
}
