//! Path management for the wallet ledger
//!
//! ## Path Resolution Order
//!
//! 1. `WALLET_LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories::ProjectDirs`
//!    (`~/.local/share/wallet-ledger` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "WALLET_LEDGER_DATA_DIR";

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve paths from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per account wallet
    pub fn wallets_dir(&self) -> PathBuf {
        self.base_dir.join("wallets")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Append-only JSONL journal of ledger mutations
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and wallets directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.wallets_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create wallets directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    let dirs = ProjectDirs::from("org", "wallet-ledger", "wallet-ledger").ok_or_else(|| {
        LedgerError::Config("Could not determine a platform data directory".into())
    })?;
    Ok(dirs.data_dir().to_path_buf())
}
