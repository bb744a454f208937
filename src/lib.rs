//! Wallet ledger - personal finance ledger
//!
//! Records income, expenses and transfers between accounts, tracks
//! per-category budgets and derives balances, alerts and reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, category identity, transactions and the wallet aggregate
//! - `storage`: Wallet repositories (JSON files, in memory)
//! - `services`: Ledger, transfer, import, alert and report logic
//! - `audit`: Append-only journal of ledger mutations
//! - `cli`: Command handlers for the `wallet` binary
//!
//! # Example
//!
//! ```rust
//! use wallet_ledger::models::{Money, Wallet};
//! use wallet_ledger::services::LedgerService;
//!
//! let ledger = LedgerService::new();
//! let mut wallet = Wallet::new();
//! ledger.add_income(&mut wallet, "Salary", Money::from_major(1000), "Monthly pay")?;
//! ledger.add_expense(&mut wallet, "Food", Money::from_major(250), "Lunch")?;
//! assert_eq!(wallet.balance().to_string(), "750.00");
//! # Ok::<(), wallet_ledger::LedgerError>(())
//! ```

use std::sync::Once;

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber
///
/// Logs go to stderr at `info` for this crate, plus any `RUST_LOG` directives.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "wallet_ledger=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
