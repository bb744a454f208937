//! Transaction model
//!
//! A transaction is an immutable ledger entry. The amount is always a
//! positive magnitude; whether it adds to or subtracts from the balance is
//! decided solely by its `TransactionType`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::{CategoryKey, UNCATEGORIZED};
use super::money::Money;

/// Classification of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
    TransferIn,
    TransferOut,
}

impl TransactionType {
    /// Income and incoming transfers add to the balance
    pub fn is_inflow(&self) -> bool {
        matches!(self, Self::Income | Self::TransferIn)
    }

    /// Expenses and outgoing transfers subtract from the balance
    pub fn is_outflow(&self) -> bool {
        !self.is_inflow()
    }

}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "INCOME"),
            Self::Expense => write!(f, "EXPENSE"),
            Self::TransferIn => write!(f, "TRANSFER_IN"),
            Self::TransferOut => write!(f, "TRANSFER_OUT"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "TRANSFER_IN" => Ok(Self::TransferIn),
            "TRANSFER_OUT" => Ok(Self::TransferOut),
            other => Err(format!("Unknown transaction type: '{}'", other)),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Display label of the category
    pub category: String,

    /// Positive magnitude, two decimals
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Free text
    #[serde(default)]
    pub note: String,

    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,

    /// Other account's login, only for transfers
    #[serde(default)]
    pub counterparty: String,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// A blank category becomes `Uncategorized`. No amount validation happens
    /// here; that is the ledger service's job.
    pub fn new(
        category: &str,
        amount: Money,
        kind: TransactionType,
        note: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let category = category.trim();
        Self {
            category: if category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                category.to_string()
            },
            amount,
            kind,
            note: note.into(),
            timestamp,
            counterparty: String::new(),
        }
    }

    /// Set the counterparty login (builder style)
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = counterparty.into();
        self
    }

    /// Return a copy relabeled to another category
    pub fn with_category(&self, category: &str) -> Self {
        Self {
            category: category.trim().to_string(),
            ..self.clone()
        }
    }

    /// Category identity of this entry
    pub fn category_key(&self) -> CategoryKey {
        CategoryKey::new(&self.category)
    }

    /// Check whether this entry belongs to a category
    pub fn is_in_category(&self, key: &CategoryKey) -> bool {
        key.matches(&self.category)
    }

    /// Amount with the sign the entry contributes to the balance
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_inflow() {
            self.amount
        } else {
            -self.amount
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            "Food",
            Money::from_major(100),
            TransactionType::Expense,
            "Lunch",
            at_noon(),
        );
        assert_eq!(txn.category, "Food");
        assert_eq!(txn.amount, Money::from_major(100));
        assert_eq!(txn.note, "Lunch");
        assert!(txn.counterparty.is_empty());
    }

    #[test]
    fn test_blank_category_defaults() {
        let txn = Transaction::new(
            "   ",
            Money::from_major(1),
            TransactionType::Income,
            "",
            at_noon(),
        );
        assert_eq!(txn.category, UNCATEGORIZED);
    }

    #[test]
    fn test_with_category_leaves_original_untouched() {
        let original = Transaction::new(
            "food",
            Money::from_major(5),
            TransactionType::Expense,
            "x",
            at_noon(),
        )
        .with_counterparty("");
        let renamed = original.with_category("Nutrition");

        assert_eq!(original.category, "food");
        assert_eq!(renamed.category, "Nutrition");
        assert_eq!(renamed.amount, original.amount);
        assert_eq!(renamed.timestamp, original.timestamp);
    }

    #[test]
    fn test_signed_amount_follows_type() {
        let amount = Money::from_major(10);
        for kind in [
            TransactionType::Income,
            TransactionType::Expense,
            TransactionType::TransferIn,
            TransactionType::TransferOut,
        ] {
            let txn = Transaction::new("c", amount, kind, "", at_noon());
            if kind.is_inflow() {
                assert_eq!(txn.signed_amount(), amount);
            } else {
                assert_eq!(txn.signed_amount(), -amount);
            }
        }
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(" Expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("UNKNOWN".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_category_match_ignores_case() {
        let txn = Transaction::new(
            "Food",
            Money::from_major(1),
            TransactionType::Expense,
            "",
            at_noon(),
        );
        assert!(txn.is_in_category(&CategoryKey::new("FOOD")));
        assert!(!txn.is_in_category(&CategoryKey::new("Fuel")));
        assert_eq!(txn.category_key(), CategoryKey::new("food"));
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::new(
            "Gift",
            Money::from_cents(5000),
            TransactionType::TransferOut,
            "Transfer to bob",
            at_noon(),
        )
        .with_counterparty("bob");

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains(r#""type":"transfer_out""#));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            "Food",
            Money::from_cents(5000),
            TransactionType::Expense,
            "",
            at_noon(),
        );
        assert_eq!(txn.to_string(), "2025-01-15 12:00 EXPENSE Food 50.00");
    }
}
