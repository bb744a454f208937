//! Audit journal for the wallet ledger
//!
//! Every mutating command appends one `AuditEntry` to an append-only
//! line-delimited JSON file (JSONL) through `AuditLogger`.
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet_ledger::audit::{AuditEntry, AuditLogger, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(
//!     &AuditEntry::new(Operation::Expense, "alice")
//!         .with_category("Food")
//!         .with_amount(amount),
//! )?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
