//! CLI handlers for recording income and expenses and listing history

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::models::TransactionType;
use crate::services::{AlertService, LedgerService};

use super::context::{parse_amount, print_alerts, CommandContext};

/// Handle the `income` and `expense` commands
pub fn handle_entry_command(
    ctx: &CommandContext,
    account: &str,
    kind: TransactionType,
    category: &str,
    amount: &str,
    note: Option<&str>,
) -> LedgerResult<()> {
    let ledger = LedgerService::new();
    let alerts = AlertService::from_settings(ctx.settings());
    let amount = parse_amount(amount)?;
    let note = note.unwrap_or_default();

    let mut wallet = ctx.load_wallet(account)?;
    let (txn, operation) = match kind {
        TransactionType::Income => (
            ledger.add_income(&mut wallet, category, amount, note)?,
            Operation::Income,
        ),
        _ => (
            ledger.add_expense(&mut wallet, category, amount, note)?,
            Operation::Expense,
        ),
    };

    let mut entry = AuditEntry::new(operation, account)
        .with_category(txn.category.clone())
        .with_amount(txn.amount);
    if !txn.note.is_empty() {
        entry = entry.with_details(txn.note.clone());
    }
    ctx.commit(account, &wallet, entry)?;

    println!(
        "Recorded {} of {} in '{}'",
        txn.kind.to_string().to_lowercase(),
        ctx.format_money(txn.amount),
        txn.category
    );
    println!("Balance: {}", ctx.format_money(wallet.balance()));

    if txn.kind.is_outflow() {
        print_alerts(&alerts.after_outflow(&wallet, &txn.category));
    } else {
        print_alerts(&alerts.after_change(&wallet));
    }

    Ok(())
}

/// Handle the `history` command
///
/// Lists the account's transactions (newest last), or with `audit` the
/// journal entries recorded for it.
pub fn handle_history_command(
    ctx: &CommandContext,
    account: &str,
    limit: Option<usize>,
    audit: bool,
) -> LedgerResult<()> {
    if audit {
        let entries = ctx.audit().read_for_account(account.trim())?;
        if entries.is_empty() {
            println!("No journal entries for '{}'.", account.trim());
            return Ok(());
        }
        let start = limit.map_or(0, |n| entries.len().saturating_sub(n));
        for entry in &entries[start..] {
            println!("{}", entry.format_human_readable());
        }
        return Ok(());
    }

    let wallet = ctx.load_wallet(account)?;
    if wallet.is_empty() {
        println!("No transactions recorded for '{}'.", account.trim());
        return Ok(());
    }

    let transactions = wallet.transactions();
    let start = limit.map_or(0, |n| transactions.len().saturating_sub(n));
    for txn in &transactions[start..] {
        if txn.note.is_empty() {
            println!("{}", txn);
        } else {
            println!("{}  {}", txn, txn.note);
        }
    }

    Ok(())
}
