//! User settings for the wallet ledger
//!
//! Holds alert thresholds, the bulk import mode and display preferences.
//! Every field has a serde default so older or partial config files load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Money;

/// How a bulk import treats a bad line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Lines are applied as they are read; a bad line stops the import but
    /// earlier lines stay committed
    #[default]
    Incremental,
    /// Every line is validated first; nothing is applied unless all pass
    AllOrNothing,
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Spent/budget ratio at which a category is reported as near its limit
    #[serde(default = "default_budget_warning_threshold")]
    pub budget_warning_threshold: Decimal,

    /// Balance at or below which a low-balance alert is raised
    #[serde(default)]
    pub low_balance_threshold: Money,

    #[serde(default)]
    pub import_mode: ImportMode,

    /// How many entries the summary lists as recent
    #[serde(default = "default_recent_transaction_count")]
    pub recent_transaction_count: usize,

    #[serde(default)]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_budget_warning_threshold() -> Decimal {
    Decimal::new(80, 2)
}

fn default_recent_transaction_count() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            budget_warning_threshold: default_budget_warning_threshold(),
            low_balance_threshold: Money::zero(),
            import_mode: ImportMode::default(),
            recent_transaction_count: default_recent_transaction_count(),
            currency_symbol: String::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
