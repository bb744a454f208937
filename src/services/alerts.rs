//! Budget and balance alerts
//!
//! Alerts are returned as data after a mutation; the caller decides how to
//! show them.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::Settings;
use crate::models::{Money, Wallet};

use super::LedgerService;

/// A condition worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerAlert {
    /// Spending in a category is above its budget
    BudgetExceeded { category: String, overspend: Money },
    /// Spending in a category reached the warning ratio of its budget
    BudgetNearLimit {
        category: String,
        percent: Decimal,
        remaining: Money,
    },
    /// Effective expenses are greater than effective income
    ExpensesExceedIncome { income: Money, expense: Money },
    /// Balance is at or below the configured floor
    LowBalance { balance: Money },
}

impl fmt::Display for LedgerAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExceeded {
                category,
                overspend,
            } => write!(f, "Budget for '{}' exceeded by {}", category, overspend),
            Self::BudgetNearLimit {
                category,
                percent,
                remaining,
            } => write!(
                f,
                "Budget for '{}' is {}% used, {} remaining",
                category, percent, remaining
            ),
            Self::ExpensesExceedIncome { income, expense } => write!(
                f,
                "Expenses ({}) exceed income ({})",
                expense, income
            ),
            Self::LowBalance { balance } => {
                write!(f, "Balance is low ({}); consider topping up", balance)
            }
        }
    }
}

/// Service that inspects a wallet for alert conditions
#[derive(Debug, Clone)]
pub struct AlertService {
    ledger: LedgerService,
    warning_threshold: Decimal,
    low_balance_threshold: Money,
}

impl AlertService {
    /// Create an alert service with explicit thresholds
    pub fn new(warning_threshold: Decimal, low_balance_threshold: Money) -> Self {
        Self {
            ledger: LedgerService::new(),
            warning_threshold,
            low_balance_threshold,
        }
    }

    /// Create an alert service from user settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.budget_warning_threshold,
            settings.low_balance_threshold,
        )
    }

    /// Budget state of one category, if it warrants an alert
    ///
    /// Categories without a budget, or with a zero budget, never alert.
    pub fn budget_alert(&self, wallet: &Wallet, category: &str) -> Option<LedgerAlert> {
        let limit = wallet.budget_for(category).filter(Money::is_positive)?;
        let spent = self.ledger.expenses_for_category(wallet, category);
        let remaining = limit - spent;
        let label = category.trim().to_string();

        if remaining.is_negative() {
            return Some(LedgerAlert::BudgetExceeded {
                category: label,
                overspend: -remaining,
            });
        }

        let ratio = (spent.amount() / limit.amount())
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
        if ratio >= self.warning_threshold {
            let percent = (ratio * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            return Some(LedgerAlert::BudgetNearLimit {
                category: label,
                percent,
                remaining,
            });
        }

        None
    }

    pub fn expenses_exceed_income(&self, wallet: &Wallet) -> Option<LedgerAlert> {
        let income = self.ledger.total_income(wallet);
        let expense = self.ledger.total_expense(wallet);
        (expense > income).then_some(LedgerAlert::ExpensesExceedIncome { income, expense })
    }

    pub fn low_balance(&self, wallet: &Wallet) -> Option<LedgerAlert> {
        let balance = self.ledger.balance(wallet);
        (balance <= self.low_balance_threshold).then_some(LedgerAlert::LowBalance { balance })
    }

    /// Alerts after money left the wallet under `category`
    pub fn after_outflow(&self, wallet: &Wallet, category: &str) -> Vec<LedgerAlert> {
        let mut alerts: Vec<_> = self.budget_alert(wallet, category).into_iter().collect();
        alerts.extend(self.balance_alerts(wallet));
        alerts
    }

    /// Wallet-wide alerts: expenses over income, low balance
    pub fn balance_alerts(&self, wallet: &Wallet) -> Vec<LedgerAlert> {
        [self.expenses_exceed_income(wallet), self.low_balance(wallet)]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Alerts after income or a budget change
    pub fn after_change(&self, wallet: &Wallet) -> Vec<LedgerAlert> {
        self.expenses_exceed_income(wallet).into_iter().collect()
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn wallet_with_budget(limit: &str, spent: &str) -> Wallet {
        let ledger = LedgerService::new();
        let mut wallet = Wallet::new();
        ledger.add_income(&mut wallet, "Salary", money("10000"), "").unwrap();
        ledger.set_budget(&mut wallet, "Food", money(limit)).unwrap();
        ledger.add_expense(&mut wallet, "food", money(spent), "").unwrap();
        wallet
    }

    #[test]
    fn test_no_alert_below_threshold() {
        let wallet = wallet_with_budget("100", "79.99");
        assert_eq!(AlertService::default().budget_alert(&wallet, "Food"), None);
    }

    #[test]
    fn test_near_limit_at_threshold() {
        let wallet = wallet_with_budget("100", "80");
        let alert = AlertService::default().budget_alert(&wallet, "Food").unwrap();

        assert_eq!(
            alert,
            LedgerAlert::BudgetNearLimit {
                category: "Food".into(),
                percent: Decimal::from(80),
                remaining: money("20"),
            }
        );
        assert_eq!(alert.to_string(), "Budget for 'Food' is 80% used, 20.00 remaining");
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 2/3 = 0.6667 -> 67%
        let wallet = wallet_with_budget("3", "2");
        let service = AlertService::new(Decimal::new(5, 1), Money::zero());

        match service.budget_alert(&wallet, "Food") {
            Some(LedgerAlert::BudgetNearLimit { percent, .. }) => {
                assert_eq!(percent, Decimal::from(67))
            }
            other => panic!("unexpected alert: {other:?}"),
        }
    }

    #[test]
    fn test_budget_exceeded() {
        let wallet = wallet_with_budget("100", "130.50");
        let alert = AlertService::default().budget_alert(&wallet, "FOOD").unwrap();

        assert_eq!(
            alert,
            LedgerAlert::BudgetExceeded {
                category: "FOOD".into(),
                overspend: money("30.50"),
            }
        );
    }

    #[test]
    fn test_zero_budget_never_alerts() {
        let wallet = wallet_with_budget("0", "10");
        assert_eq!(AlertService::default().budget_alert(&wallet, "Food"), None);
    }

    #[test]
    fn test_unbudgeted_category_never_alerts() {
        let wallet = wallet_with_budget("100", "10");
        assert_eq!(AlertService::default().budget_alert(&wallet, "Rent"), None);
    }

    #[test]
    fn test_expenses_exceed_income_and_low_balance() {
        let ledger = LedgerService::new();
        let mut wallet = Wallet::new();
        ledger.add_income(&mut wallet, "Salary", money("10"), "").unwrap();
        ledger.add_expense(&mut wallet, "Food", money("15"), "").unwrap();

        let alerts = AlertService::default().after_outflow(&wallet, "Food");

        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], LedgerAlert::ExpensesExceedIncome { .. }));
        assert_eq!(
            alerts[1],
            LedgerAlert::LowBalance {
                balance: money("-5")
            }
        );
    }

    #[test]
    fn test_balance_exactly_at_floor_alerts() {
        let ledger = LedgerService::new();
        let mut wallet = Wallet::new();
        ledger.add_income(&mut wallet, "Salary", money("100"), "").unwrap();
        ledger.add_expense(&mut wallet, "Food", money("50"), "").unwrap();
        let service = AlertService::new(Decimal::new(80, 2), money("50"));

        assert!(service.low_balance(&wallet).is_some());
        assert!(service.expenses_exceed_income(&wallet).is_none());
        assert!(service.after_change(&wallet).is_empty());
    }
}
