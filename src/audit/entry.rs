//! Audit entry data structures
//!
//! One entry per mutating ledger command: which account, what kind of
//! change, and the category and amount involved where there is one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Kinds of ledger mutation that are journaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Income,
    Expense,
    Transfer,
    SetBudget,
    RenameCategory,
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Income => write!(f, "INCOME"),
            Operation::Expense => write!(f, "EXPENSE"),
            Operation::Transfer => write!(f, "TRANSFER"),
            Operation::SetBudget => write!(f, "SET_BUDGET"),
            Operation::RenameCategory => write!(f, "RENAME_CATEGORY"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Login of the account whose wallet changed
    pub account: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    /// Free-form context (counterparty, import count, rename target)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuditEntry {
    /// Create an entry for an operation on an account, stamped now
    pub fn new(operation: Operation, account: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            account: account.into(),
            category: None,
            amount: None,
            details: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.account
        );

        if let Some(category) = &self.category {
            output.push_str(&format!(" {}", category));
        }

        if let Some(amount) = &self.amount {
            output.push_str(&format!(" {}", amount));
        }

        if let Some(details) = &self.details {
            output.push_str(&format!(" ({})", details));
        }

        output
    }
}
