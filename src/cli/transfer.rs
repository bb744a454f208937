//! CLI command handler for transfers between accounts

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::services::{AlertService, TransferService};

use super::context::{parse_amount, print_alerts, CommandContext};

/// Handle the transfer command
///
/// The sender wallet is saved only after the recipient wallet was saved.
/// Unknown recipients are rejected unless `create_recipient` is set.
pub fn handle_transfer_command(
    ctx: &CommandContext,
    account: &str,
    recipient: &str,
    amount: &str,
    category: &str,
    create_recipient: bool,
) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    let mut wallet = ctx.load_wallet(account)?;

    // On any error, including a failed delivery, `wallet` is dropped unsaved
    // and the in-memory debit goes with it.
    let receipt = TransferService::new(ctx.store())
        .create_missing_recipient(create_recipient)
        .transfer(account, &mut wallet, recipient, amount, category)?;

    ctx.commit(
        account,
        &wallet,
        AuditEntry::new(Operation::Transfer, account)
            .with_category(receipt.outgoing.category.clone())
            .with_amount(receipt.outgoing.amount)
            .with_details(format!("to {}", receipt.outgoing.counterparty)),
    )?;

    println!(
        "Transferred {} to '{}' ({})",
        ctx.format_money(receipt.outgoing.amount),
        receipt.outgoing.counterparty,
        receipt.outgoing.category
    );
    println!("Balance: {}", ctx.format_money(wallet.balance()));
    print_alerts(
        &AlertService::from_settings(ctx.settings())
            .after_outflow(&wallet, &receipt.outgoing.category),
    );

    Ok(())
}
