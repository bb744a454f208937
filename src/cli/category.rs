//! Category CLI commands

use clap::Subcommand;

use crate::audit::{AuditEntry, Operation};
use crate::error::LedgerResult;
use crate::services::LedgerService;

use super::context::CommandContext;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Rename a category in every transaction and budget
    Rename {
        /// Current name (case-insensitive)
        from: String,
        /// New name
        to: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    ctx: &CommandContext,
    account: &str,
    cmd: CategoryCommands,
) -> LedgerResult<()> {
    match cmd {
        CategoryCommands::Rename { from, to } => {
            let mut wallet = ctx.load_wallet(account)?;
            let before = wallet.clone();
            let changed = LedgerService::new().rename_category(&mut wallet, &from, &to)?;

            if wallet == before {
                if before.knows_category(&from) {
                    println!(
                        "Category '{}' is already named '{}', nothing changed",
                        from.trim(),
                        to.trim()
                    );
                } else {
                    println!("Category '{}' not found, nothing changed", from.trim());
                }
                return Ok(());
            }

            ctx.commit(
                account,
                &wallet,
                AuditEntry::new(Operation::RenameCategory, account)
                    .with_category(from.trim())
                    .with_details(format!("to '{}', {} transactions", to.trim(), changed)),
            )?;

            println!(
                "Renamed '{}' to '{}' ({} transactions updated)",
                from.trim(),
                to.trim(),
                changed
            );
        }
    }

    Ok(())
}
