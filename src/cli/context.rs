//! Shared state for CLI command handlers
//!
//! Every command runs against one account: load its wallet, apply the
//! operation, save the wallet back and journal the change.

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Wallet};
use crate::services::LedgerAlert;
use crate::storage::{JsonWalletStore, WalletRepository};

/// Paths, settings, wallet store and audit journal for one invocation
pub struct CommandContext {
    paths: LedgerPaths,
    settings: Settings,
    store: JsonWalletStore,
    audit: AuditLogger,
}

impl CommandContext {
    /// Build the context, creating the data directories if needed
    pub fn new(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            store: JsonWalletStore::new(paths.wallets_dir()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            settings,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &JsonWalletStore {
        &self.store
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_wallet(&self, account: &str) -> LedgerResult<Wallet> {
        self.store.load(account)
    }

    /// Save the wallet and append the journal entry
    ///
    /// A journal write failure is logged but does not fail the command; the
    /// wallet is already saved at that point.
    pub fn commit(&self, account: &str, wallet: &Wallet, entry: AuditEntry) -> LedgerResult<()> {
        self.store.save(account, wallet)?;
        if let Err(e) = self.audit.log(&entry) {
            warn!(account, error = %e, "failed to write audit entry");
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.settings.currency_symbol)
    }
}

/// Parse an amount typed on the command line
pub fn parse_amount(raw: &str) -> LedgerResult<Money> {
    Money::parse(raw).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount '{}': {}. Use a format like '100', '100.50' or '100,50'",
            raw, e
        ))
    })
}

/// Print alerts below a command's output
pub fn print_alerts(alerts: &[LedgerAlert]) {
    for alert in alerts {
        println!("Warning: {}", alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    #[test]
    fn test_commit_saves_and_journals() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let context = CommandContext::new(paths, Settings::default()).unwrap();

        let mut wallet = context.load_wallet("alice").unwrap();
        wallet.set_budget("Food", Money::from_major(10));
        context
            .commit(
                "alice",
                &wallet,
                AuditEntry::new(Operation::SetBudget, "alice").with_category("Food"),
            )
            .unwrap();

        assert_eq!(context.load_wallet("alice").unwrap(), wallet);
        assert_eq!(context.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,5").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }
}
