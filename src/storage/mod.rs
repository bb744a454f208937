//! Storage layer for the wallet ledger
//!
//! Provides JSON file storage with atomic writes and the repository
//! abstraction the transfer and CLI layers load and persist wallets through.

pub mod file_io;
pub mod wallets;

pub use file_io::{read_json_or_default, write_json_atomic};
pub use wallets::{InMemoryWalletStore, JsonWalletStore, WalletRepository};
