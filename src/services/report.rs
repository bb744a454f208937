//! Wallet reports
//!
//! Reports are plain data built from the ledger service's query methods.
//! Rendering them (tables, text, files) is left to the CLI.

use crate::models::{Money, Transaction, TransactionType, Wallet};

use super::{BudgetStatus, LedgerService};

/// Overview of a wallet
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSummary {
    pub balance: Money,
    pub total_income: Money,
    pub total_expense: Money,
    /// Income totals per category, ordered case-insensitively
    pub income_by_category: Vec<(String, Money)>,
    /// Expense totals per category, ordered case-insensitively
    pub expense_by_category: Vec<(String, Money)>,
    pub budgets: Vec<BudgetStatus>,
    /// Newest first
    pub recent: Vec<Transaction>,
}

/// Figures for one requested category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// The name as requested, trimmed
    pub category: String,
    /// Whether any transaction or budget uses the category
    pub known: bool,
    pub incomes: Money,
    pub expenses: Money,
    pub budget: Option<Money>,
    pub remaining: Option<Money>,
}

/// Service for building wallet reports
#[derive(Debug, Clone, Copy)]
pub struct ReportService {
    ledger: LedgerService,
    recent_count: usize,
}

impl ReportService {
    /// Create a report service listing `recent_count` recent transactions
    pub fn new(recent_count: usize) -> Self {
        Self {
            ledger: LedgerService::new(),
            recent_count,
        }
    }

    /// Build the wallet summary
    pub fn summary(&self, wallet: &Wallet) -> WalletSummary {
        WalletSummary {
            balance: self.ledger.balance(wallet),
            total_income: self.ledger.total_income(wallet),
            total_expense: self.ledger.total_expense(wallet),
            income_by_category: self.category_totals(wallet, TransactionType::Income),
            expense_by_category: self.category_totals(wallet, TransactionType::Expense),
            budgets: self.ledger.budget_statuses(wallet),
            recent: self.recent(wallet),
        }
    }

    /// Break down the requested categories; blank names are skipped
    pub fn category_breakdown<S: AsRef<str>>(
        &self,
        wallet: &Wallet,
        categories: &[S],
    ) -> Vec<CategoryBreakdown> {
        categories
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .map(|category| CategoryBreakdown {
                category: category.to_string(),
                known: wallet.knows_category(category),
                incomes: self.ledger.incomes_for_category(wallet, category),
                expenses: self.ledger.expenses_for_category(wallet, category),
                budget: wallet.budget_for(category),
                remaining: self.ledger.remaining_budget(wallet, category),
            })
            .collect()
    }

    /// Most recent transactions, newest first
    ///
    /// Entries with equal timestamps keep the later-inserted one first.
    pub fn recent(&self, wallet: &Wallet) -> Vec<Transaction> {
        let mut recent: Vec<Transaction> = wallet.transactions().iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        recent.truncate(self.recent_count);
        recent
    }

    fn category_totals(&self, wallet: &Wallet, kind: TransactionType) -> Vec<(String, Money)> {
        self.ledger
            .totals_by_category(wallet, kind)
            .into_iter()
            .map(|(key, total)| (key.to_string(), total))
            .collect()
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(5)
    }
}
