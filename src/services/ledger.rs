//! Ledger service
//!
//! Stateless facade over a single wallet. It is the only place new
//! transactions are built, so it owns amount validation and timestamp
//! assignment, and it provides the "effective" income and expense views
//! (transfers included) that budgets, alerts and reports are computed from.

use chrono::Utc;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryKey, Money, Transaction, TransactionType, Wallet, MAX_AMOUNT};

/// Limit, spending and remaining amount of one category budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    /// Category label as stored in the budget table
    pub category: String,
    pub limit: Money,
    /// Expenses plus outgoing transfers in the category
    pub spent: Money,
    /// `limit - spent`; negative when overspent
    pub remaining: Money,
}

impl BudgetStatus {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Service for recording and querying wallet entries
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerService;

impl LedgerService {
    /// Create a new ledger service
    pub fn new() -> Self {
        Self
    }

    /// Record an income entry
    pub fn add_income(
        &self,
        wallet: &mut Wallet,
        category: &str,
        amount: Money,
        note: &str,
    ) -> LedgerResult<Transaction> {
        self.record(wallet, category, amount, TransactionType::Income, note, None)
    }

    /// Record an expense entry
    pub fn add_expense(
        &self,
        wallet: &mut Wallet,
        category: &str,
        amount: Money,
        note: &str,
    ) -> LedgerResult<Transaction> {
        self.record(wallet, category, amount, TransactionType::Expense, note, None)
    }

    /// Record the debit side of a transfer to `recipient`
    pub fn register_transfer_out(
        &self,
        wallet: &mut Wallet,
        category: &str,
        amount: Money,
        recipient: &str,
    ) -> LedgerResult<Transaction> {
        let recipient = require_login(recipient)?;
        self.record(
            wallet,
            category,
            amount,
            TransactionType::TransferOut,
            &format!("Transfer to user {}", recipient),
            Some(recipient),
        )
    }

    /// Record the credit side of a transfer from `sender`
    pub fn register_transfer_in(
        &self,
        wallet: &mut Wallet,
        category: &str,
        amount: Money,
        sender: &str,
    ) -> LedgerResult<Transaction> {
        let sender = require_login(sender)?;
        self.record(
            wallet,
            category,
            amount,
            TransactionType::TransferIn,
            &format!("Transfer from user {}", sender),
            Some(sender),
        )
    }

    fn record(
        &self,
        wallet: &mut Wallet,
        category: &str,
        amount: Money,
        kind: TransactionType,
        note: &str,
        counterparty: Option<&str>,
    ) -> LedgerResult<Transaction> {
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }
        require_within_limit(amount)?;

        let mut txn = Transaction::new(category, amount, kind, note, Utc::now());
        if let Some(counterparty) = counterparty {
            txn = txn.with_counterparty(counterparty);
        }

        debug!(kind = %txn.kind, category = %txn.category, amount = %txn.amount, "recording transaction");
        wallet.add_transaction(txn.clone());
        Ok(txn)
    }

    /// Set or overwrite the budget of a category (case-insensitive)
    ///
    /// A zero limit is allowed; a negative one is not.
    pub fn set_budget(&self, wallet: &mut Wallet, category: &str, amount: Money) -> LedgerResult<()> {
        if category.trim().is_empty() {
            return Err(LedgerError::Validation("Budget category cannot be empty".into()));
        }
        if amount.is_negative() {
            return Err(LedgerError::Validation(format!(
                "Budget cannot be negative, got {}",
                amount
            )));
        }
        require_within_limit(amount)?;

        debug!(category = category.trim(), amount = %amount, "setting budget");
        wallet.set_budget(category, amount);
        Ok(())
    }

    /// Income plus incoming transfers
    pub fn total_income(&self, wallet: &Wallet) -> Money {
        wallet.total_by_type(TransactionType::Income) + wallet.total_by_type(TransactionType::TransferIn)
    }

    /// Expenses plus outgoing transfers
    pub fn total_expense(&self, wallet: &Wallet) -> Money {
        wallet.total_by_type(TransactionType::Expense)
            + wallet.total_by_type(TransactionType::TransferOut)
    }

    /// Current balance of the wallet
    pub fn balance(&self, wallet: &Wallet) -> Money {
        wallet.balance()
    }

    /// Outflows (expenses and outgoing transfers) in a category
    pub fn expenses_for_category(&self, wallet: &Wallet, category: &str) -> Money {
        sum_in_category(wallet, category, TransactionType::is_outflow)
    }

    /// Inflows (income and incoming transfers) in a category
    pub fn incomes_for_category(&self, wallet: &Wallet, category: &str) -> Money {
        sum_in_category(wallet, category, TransactionType::is_inflow)
    }

    /// Budget minus expenses for a category, or `None` if no budget is set
    pub fn remaining_budget(&self, wallet: &Wallet, category: &str) -> Option<Money> {
        wallet
            .budget_for(category)
            .map(|limit| limit - self.expenses_for_category(wallet, category))
    }

    /// Rename a category across the log and budget table
    pub fn rename_category(&self, wallet: &mut Wallet, from: &str, to: &str) -> LedgerResult<usize> {
        let changed = wallet.rename_category(from, to)?;
        debug!(from = from.trim(), to = to.trim(), changed, "renamed category");
        Ok(changed)
    }

    /// Per-category totals of one transaction type
    pub fn totals_by_category(
        &self,
        wallet: &Wallet,
        kind: TransactionType,
    ) -> std::collections::BTreeMap<CategoryKey, Money> {
        wallet.totals_by_category(kind)
    }

    /// Status of every budget, ordered case-insensitively by category
    pub fn budget_statuses(&self, wallet: &Wallet) -> Vec<BudgetStatus> {
        wallet
            .budgets()
            .iter()
            .map(|(key, limit)| {
                let spent = self.expenses_for_category(wallet, key.as_str());
                BudgetStatus {
                    category: key.to_string(),
                    limit: *limit,
                    spent,
                    remaining: *limit - spent,
                }
            })
            .collect()
    }
}

fn require_login(login: &str) -> LedgerResult<&str> {
    let login = login.trim();
    if login.is_empty() {
        return Err(LedgerError::Validation("Counterparty login cannot be empty".into()));
    }
    Ok(login)
}

fn require_within_limit(amount: Money) -> LedgerResult<()> {
    if !amount.is_within_limit() {
        return Err(LedgerError::Validation(format!(
            "Amount {} exceeds the maximum of {}",
            amount, MAX_AMOUNT
        )));
    }
    Ok(())
}

fn sum_in_category(wallet: &Wallet, category: &str, include: fn(&TransactionType) -> bool) -> Money {
    let key = CategoryKey::new(category);
    wallet
        .transactions()
        .iter()
        .filter(|t| include(&t.kind) && t.is_in_category(&key))
        .map(|t| t.amount)
        .sum()
}
