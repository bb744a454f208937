//! Budget CLI commands

use clap::Subcommand;
use tabled::{settings::Style, Table, Tabled};

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::services::{AlertService, LedgerService};

use super::context::{parse_amount, print_alerts, CommandContext};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set or replace the monthly limit of a category
    Set {
        /// Category name (case-insensitive)
        category: String,
        /// Limit (e.g., "300" or "300.00")
        amount: String,
    },

    /// List budgets with spending and remaining amounts
    List,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Handle a budget command
pub fn handle_budget_command(
    ctx: &CommandContext,
    account: &str,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let ledger = LedgerService::new();

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let amount = parse_amount(&amount)?;
            let mut wallet = ctx.load_wallet(account)?;

            ledger.set_budget(&mut wallet, &category, amount)?;
            ctx.commit(
                account,
                &wallet,
                AuditEntry::new(Operation::SetBudget, account)
                    .with_category(category.trim())
                    .with_amount(amount),
            )?;

            println!(
                "Budget for '{}' set to {}",
                category.trim(),
                ctx.format_money(amount)
            );
            if let Some(remaining) = ledger.remaining_budget(&wallet, &category) {
                println!("Remaining: {}", ctx.format_money(remaining));
            }
            print_alerts(&AlertService::from_settings(ctx.settings()).after_change(&wallet));
        }

        BudgetCommands::List => {
            let wallet = ctx.load_wallet(account)?;
            let statuses = ledger.budget_statuses(&wallet);

            if statuses.is_empty() {
                println!("No budgets set.");
                return Ok(());
            }

            let rows: Vec<BudgetRow> = statuses
                .iter()
                .map(|s| BudgetRow {
                    category: s.category.clone(),
                    limit: ctx.format_money(s.limit),
                    spent: ctx.format_money(s.spent),
                    remaining: ctx.format_money(s.remaining),
                })
                .collect();

            println!("{}", Table::new(rows).with(Style::rounded()));
        }
    }

    Ok(())
}
