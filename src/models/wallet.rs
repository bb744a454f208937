//! Wallet aggregate
//!
//! A wallet is the ledger of one account: an append-only, insertion-ordered
//! transaction log plus a budget table keyed by case-insensitive category.
//! All derivations over its own data (balance, per-type and per-category
//! totals) and the bulk category rename live here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::CategoryKey;
use super::money::Money;
use super::transaction::{Transaction, TransactionType};
use crate::error::{LedgerError, LedgerResult};

/// Ledger aggregate for a single account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    #[serde(default)]
    transactions: Vec<Transaction>,

    /// Monthly limit per category; at most one entry per case-insensitive name
    #[serde(default)]
    budgets: BTreeMap<CategoryKey, Money>,
}

impl Wallet {
    /// Create an empty wallet
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. No validation happens here.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// All transactions in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of recorded transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the wallet has no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Set or overwrite a category budget
    ///
    /// If a budget already exists under a name matching `category` ignoring
    /// case, its value is replaced and its original casing kept. Otherwise a
    /// new entry is inserted using the caller's casing.
    pub fn set_budget(&mut self, category: &str, amount: Money) {
        let key = CategoryKey::new(category);
        match self.budgets.get_mut(&key) {
            Some(existing) => *existing = amount,
            None => {
                self.budgets.insert(key, amount);
            }
        }
    }

    /// Budget for a category (case-insensitive), if one is set
    pub fn budget_for(&self, category: &str) -> Option<Money> {
        self.budgets.get(&CategoryKey::new(category)).copied()
    }

    /// All budgets, ordered case-insensitively by category
    pub fn budgets(&self) -> &BTreeMap<CategoryKey, Money> {
        &self.budgets
    }

    /// Income + transfers in - expenses - transfers out
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    /// Sum of amounts of all transactions of exactly this type
    pub fn total_by_type(&self, kind: TransactionType) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Per-category sums for one transaction type
    ///
    /// Grouping uses the same case-insensitive identity as budgets and rename;
    /// each group is labeled with the first casing seen in the log.
    pub fn totals_by_category(&self, kind: TransactionType) -> BTreeMap<CategoryKey, Money> {
        let mut totals: BTreeMap<CategoryKey, Money> = BTreeMap::new();
        for txn in self.transactions.iter().filter(|t| t.kind == kind) {
            *totals.entry(txn.category_key()).or_default() += txn.amount;
        }
        totals
    }

    /// Check whether any transaction or budget uses this category
    pub fn knows_category(&self, category: &str) -> bool {
        let key = CategoryKey::new(category);
        self.budgets.contains_key(&key) || self.transactions.iter().any(|t| t.is_in_category(&key))
    }

    /// Relabel every transaction in `from` to `to` and merge budgets
    ///
    /// Matching is case-insensitive. A budget under `from` is added to any
    /// budget already under `to` (keeping that entry's casing) and the `from`
    /// entry is removed. Returns the number of transactions relabeled; renaming
    /// a category to itself (ignoring case) changes nothing and returns 0.
    pub fn rename_category(&mut self, from: &str, to: &str) -> LedgerResult<usize> {
        let from_key = CategoryKey::new(from);
        let to_key = CategoryKey::new(to);
        if from_key.is_empty() || to_key.is_empty() {
            return Err(LedgerError::Validation(
                "Both the source and target category must be given".into(),
            ));
        }
        if from_key == to_key {
            return Ok(0);
        }

        let mut changed = 0;
        for txn in self.transactions.iter_mut() {
            if txn.is_in_category(&from_key) {
                *txn = txn.with_category(to_key.as_str());
                changed += 1;
            }
        }

        if let Some(amount) = self.budgets.remove(&from_key) {
            match self.budgets.get_mut(&to_key) {
                Some(existing) => *existing += amount,
                None => {
                    self.budgets.insert(to_key, amount);
                }
            }
        }

        Ok(changed)
    }
}
