//! Wallet repositories
//!
//! The ledger core needs three things from persistence: load a wallet by
//! account (an unknown account yields a fresh empty wallet), save it back,
//! and tell whether an account has ever been saved.
//! `JsonWalletStore` keeps one JSON file per account; `InMemoryWalletStore`
//! keeps wallets in a map for tests and embedding callers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Wallet;

use super::file_io::{read_json_or_default, write_json_atomic};

/// Load/save contract for wallet persistence
pub trait WalletRepository {
    /// Load the wallet of an account; never fails on "not found"
    fn load(&self, account: &str) -> LedgerResult<Wallet>;

    /// Persist the wallet of an account
    fn save(&self, account: &str, wallet: &Wallet) -> LedgerResult<()>;

    /// Check whether a wallet has been saved for an account
    fn exists(&self, account: &str) -> LedgerResult<bool>;
}

/// Reject identifiers that are blank or could escape the wallets directory
fn validate_account(account: &str) -> LedgerResult<&str> {
    let account = account.trim();
    if account.is_empty() {
        return Err(LedgerError::Validation("Account login cannot be empty".into()));
    }
    if account.contains(['/', '\\']) || account.contains("..") {
        return Err(LedgerError::Validation(format!(
            "Account login '{}' contains invalid characters",
            account
        )));
    }
    Ok(account)
}

/// One `<account>-wallet.json` file per account
pub struct JsonWalletStore {
    dir: PathBuf,
}

impl JsonWalletStore {
    /// Create a store over a directory; the directory is created on first save
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the wallet file for an account
    pub fn wallet_file(&self, account: &str) -> LedgerResult<PathBuf> {
        let account = validate_account(account)?;
        Ok(self.dir.join(format!("{}-wallet.json", account)))
    }
}

impl WalletRepository for JsonWalletStore {
    fn load(&self, account: &str) -> LedgerResult<Wallet> {
        let path = self.wallet_file(account)?;
        let wallet: Wallet = read_json_or_default(&path)?;
        debug!(account, transactions = wallet.len(), "loaded wallet");
        Ok(wallet)
    }

    fn save(&self, account: &str, wallet: &Wallet) -> LedgerResult<()> {
        let path = self.wallet_file(account)?;
        write_json_atomic(&path, wallet)?;
        debug!(account, transactions = wallet.len(), "saved wallet");
        Ok(())
    }

    fn exists(&self, account: &str) -> LedgerResult<bool> {
        Ok(self.wallet_file(account)?.is_file())
    }
}

/// Wallets kept in memory, keyed by account login
#[derive(Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<HashMap<String, Wallet>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts that have been saved
    pub fn count(&self) -> LedgerResult<usize> {
        let wallets = self
            .wallets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(wallets.len())
    }
}

impl WalletRepository for InMemoryWalletStore {
    fn load(&self, account: &str) -> LedgerResult<Wallet> {
        let account = validate_account(account)?;
        let wallets = self
            .wallets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(wallets.get(account).cloned().unwrap_or_default())
    }

    fn save(&self, account: &str, wallet: &Wallet) -> LedgerResult<()> {
        let account = validate_account(account)?;
        let mut wallets = self
            .wallets
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        wallets.insert(account.to_string(), wallet.clone());
        Ok(())
    }

    fn exists(&self, account: &str) -> LedgerResult<bool> {
        let account = validate_account(account)?;
        let wallets = self
            .wallets
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(wallets.contains_key(account))
    }
}
