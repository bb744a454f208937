//! Service layer for the wallet ledger
//!
//! The service layer provides business logic on top of the wallet aggregate:
//! validation, timestamping, cross-wallet transfers, bulk import, alerts and
//! reports.

pub mod alerts;
pub mod import;
pub mod ledger;
pub mod report;
pub mod transfer;

pub use alerts::{AlertService, LedgerAlert};
pub use import::ImportService;
pub use ledger::{BudgetStatus, LedgerService};
pub use report::{CategoryBreakdown, ReportService, WalletSummary};
pub use transfer::{TransferReceipt, TransferService};
