//! Cross-module ledger behavior: services over persisted wallets

use tempfile::TempDir;

use wallet_ledger::config::ImportMode;
use wallet_ledger::models::{Money, TransactionType, Wallet};
use wallet_ledger::services::{ImportService, LedgerService, ReportService, TransferService};
use wallet_ledger::storage::{InMemoryWalletStore, JsonWalletStore, WalletRepository};

fn money(s: &str) -> Money {
    Money::parse(s).unwrap()
}

#[test]
fn income_minus_expense_equals_balance() {
    let ledger = LedgerService::new();
    let mut wallet = Wallet::new();

    let entries = [
        ("1000", true),
        ("0.10", false),
        ("0.20", false),
        ("33.335", true),
        ("999.99", false),
        ("12,5", true),
    ];
    for (amount, is_income) in entries {
        if is_income {
            ledger.add_income(&mut wallet, "Misc", money(amount), "").unwrap();
        } else {
            ledger.add_expense(&mut wallet, "Misc", money(amount), "").unwrap();
        }
        assert_eq!(
            ledger.total_income(&wallet) - ledger.total_expense(&wallet),
            wallet.balance()
        );
    }
    assert_eq!(wallet.balance().to_string(), "45.55");
}

#[test]
fn rename_relabels_and_merges_budgets() {
    let ledger = LedgerService::new();
    let mut wallet = Wallet::new();
    ledger.add_expense(&mut wallet, "food", money("10"), "").unwrap();
    ledger.add_expense(&mut wallet, "Food", money("20"), "").unwrap();
    ledger.add_expense(&mut wallet, "Rent", money("30"), "").unwrap();
    ledger.set_budget(&mut wallet, "food", money("1000")).unwrap();
    ledger.set_budget(&mut wallet, "NUTRITION", money("500")).unwrap();

    let changed = ledger.rename_category(&mut wallet, "food", "nutrition").unwrap();

    assert_eq!(changed, 2);
    assert_eq!(wallet.budgets().len(), 1);
    assert_eq!(wallet.budget_for("nutrition"), Some(money("1500")));
    assert_eq!(wallet.budget_for("food"), None);
    assert_eq!(ledger.remaining_budget(&wallet, "Nutrition"), Some(money("1470")));
}

#[test]
fn transfer_between_json_wallets() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonWalletStore::new(temp_dir.path().join("wallets"));
    let ledger = LedgerService::new();

    let mut alice = store.load("alice").unwrap();
    ledger.add_income(&mut alice, "Salary", money("100"), "").unwrap();
    store.save("bob", &Wallet::new()).unwrap();
    let bob_income_before = ledger.total_income(&store.load("bob").unwrap());
    let alice_expense_before = ledger.total_expense(&alice);

    TransferService::new(&store)
        .transfer("alice", &mut alice, "bob", money("50.00"), "Gift")
        .unwrap();
    store.save("alice", &alice).unwrap();

    let alice = store.load("alice").unwrap();
    let bob = store.load("bob").unwrap();
    assert_eq!(ledger.total_income(&bob) - bob_income_before, money("50.00"));
    assert_eq!(ledger.total_expense(&alice) - alice_expense_before, money("50.00"));
    assert_eq!(bob.transactions()[0].kind, TransactionType::TransferIn);
    assert_eq!(bob.transactions()[0].counterparty, "alice");
}

#[test]
fn self_transfer_never_mutates() {
    let store = InMemoryWalletStore::new();
    let ledger = LedgerService::new();
    let mut alice = Wallet::new();
    ledger.add_income(&mut alice, "Salary", money("100"), "").unwrap();
    store.save("alice", &alice).unwrap();

    for recipient in ["alice", "Alice", "ALICE"] {
        let err = TransferService::new(&store)
            .transfer("alice", &mut alice, recipient, money("10"), "Gift")
            .unwrap_err();
        assert!(err.is_validation());
    }

    assert_eq!(alice.len(), 1);
    assert_eq!(store.load("alice").unwrap().len(), 1);
}

#[test]
fn unknown_recipient_leaves_both_wallets_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let store = JsonWalletStore::new(temp_dir.path().join("wallets"));
    let ledger = LedgerService::new();
    let mut alice = Wallet::new();
    ledger.add_income(&mut alice, "Salary", money("100"), "").unwrap();
    store.save("alice", &alice).unwrap();

    let err = TransferService::new(&store)
        .transfer("alice", &mut alice, "bbo", money("50"), "Gift")
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(alice, store.load("alice").unwrap());
    assert!(!store.exists("bbo").unwrap());
    assert!(!temp_dir.path().join("wallets").join("bbo-wallet.json").exists());
}

#[test]
fn import_then_report() {
    let mut wallet = Wallet::new();
    let data = "type;category;amount;note\nINCOME;Salary;1000;Monthly pay\n\nEXPENSE;Food;250;Lunch\nEXPENSE;food;\"12,50\";\"Snacks; late\"\n";

    let imported = ImportService::new(ImportMode::Incremental)
        .import_reader(&mut wallet, data.as_bytes())
        .unwrap();

    assert_eq!(imported, 3);
    let summary = ReportService::default().summary(&wallet);
    assert_eq!(summary.balance, money("737.50"));
    assert_eq!(summary.expense_by_category, vec![("Food".to_string(), money("262.50"))]);
    assert_eq!(summary.recent.len(), 3);
    assert_eq!(summary.recent[0].note, "Snacks; late");
}

#[test]
fn set_budget_is_idempotent_across_casing() {
    let ledger = LedgerService::new();
    let mut wallet = Wallet::new();

    ledger.set_budget(&mut wallet, "Travel", money("300")).unwrap();
    ledger.set_budget(&mut wallet, "tRAVEL", money("300")).unwrap();

    assert_eq!(wallet.budgets().len(), 1);
    assert_eq!(wallet.budget_for("TRAVEL"), Some(money("300")));
}
