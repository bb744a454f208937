//! Core data models for the wallet ledger
//!
//! This module contains the data structures of the ledger domain: money,
//! category identity, transactions and the wallet aggregate.

pub mod category;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use category::{CategoryKey, UNCATEGORIZED};
pub use money::{Money, MoneyParseError, MAX_AMOUNT, MONEY_SCALE};
pub use transaction::{Transaction, TransactionType};
pub use wallet::Wallet;
