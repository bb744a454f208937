//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod context;
pub mod import;
pub mod report;
pub mod transaction;
pub mod transfer;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use context::CommandContext;
pub use import::handle_import_command;
pub use report::{handle_breakdown_command, handle_summary_command};
pub use transaction::{handle_entry_command, handle_history_command};
pub use transfer::handle_transfer_command;
