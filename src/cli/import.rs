//! CLI command handler for bulk import

use std::path::Path;

use tracing::warn;

use crate::audit::{AuditEntry, Operation};
use crate::config::ImportMode;
use crate::error::LedgerResult;
use crate::services::{AlertService, ImportService};

use super::context::{print_alerts, CommandContext};

/// Handle the import command
///
/// In incremental mode the lines applied before a bad line are saved even
/// though the command fails.
pub fn handle_import_command(
    ctx: &CommandContext,
    account: &str,
    file: &Path,
    all_or_nothing: bool,
) -> LedgerResult<()> {
    let mode = if all_or_nothing {
        ImportMode::AllOrNothing
    } else {
        ctx.settings().import_mode
    };

    let mut wallet = ctx.load_wallet(account)?;
    let before = wallet.len();

    match ImportService::new(mode).import_file(&mut wallet, file) {
        Ok(imported) => {
            ctx.commit(
                account,
                &wallet,
                AuditEntry::new(Operation::Import, account)
                    .with_details(format!("{} rows from {}", imported, file.display())),
            )?;

            println!("Imported {} transactions from {}", imported, file.display());
            println!("Balance: {}", ctx.format_money(wallet.balance()));
            print_alerts(&AlertService::from_settings(ctx.settings()).balance_alerts(&wallet));
            Ok(())
        }
        Err(e) => {
            let applied = wallet.len() - before;
            if applied > 0 {
                warn!(account, applied, "saving partially imported rows");
                ctx.commit(
                    account,
                    &wallet,
                    AuditEntry::new(Operation::Import, account).with_details(format!(
                        "{} rows from {} before error: {}",
                        applied,
                        file.display(),
                        e
                    )),
                )?;
                println!("Imported {} transactions before the error", applied);
            }
            Err(e)
        }
    }
}
