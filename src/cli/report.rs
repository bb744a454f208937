//! CLI handlers for wallet summary and category breakdown

use tabled::{settings::Style, Table, Tabled};

use crate::error::LedgerResult;
use crate::models::Money;
use crate::services::ReportService;

use super::context::CommandContext;

#[derive(Tabled)]
struct TotalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn print_totals(ctx: &CommandContext, title: &str, totals: &[(String, Money)]) {
    println!();
    println!("{}:", title);
    if totals.is_empty() {
        println!("  (none)");
        return;
    }
    let rows: Vec<TotalRow> = totals
        .iter()
        .map(|(category, total)| TotalRow {
            category: category.clone(),
            total: ctx.format_money(*total),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Handle the summary command
pub fn handle_summary_command(ctx: &CommandContext, account: &str) -> LedgerResult<()> {
    let wallet = ctx.load_wallet(account)?;
    let summary = ReportService::new(ctx.settings().recent_transaction_count).summary(&wallet);

    println!("Account:       {}", account.trim());
    println!("Balance:       {}", ctx.format_money(summary.balance));
    println!("Total income:  {}", ctx.format_money(summary.total_income));
    println!("Total expense: {}", ctx.format_money(summary.total_expense));

    print_totals(ctx, "Income by category", &summary.income_by_category);
    print_totals(ctx, "Expenses by category", &summary.expense_by_category);

    println!();
    println!("Budgets:");
    if summary.budgets.is_empty() {
        println!("  (none)");
    }
    for status in &summary.budgets {
        println!(
            "  {}: {}, remaining {}",
            status.category,
            ctx.format_money(status.limit),
            ctx.format_money(status.remaining)
        );
    }

    println!();
    println!("Recent transactions:");
    if summary.recent.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    let rows: Vec<RecentRow> = summary
        .recent
        .iter()
        .map(|t| RecentRow {
            date: t.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            kind: t.kind.to_string(),
            category: t.category.clone(),
            amount: ctx.format_money(t.amount),
            note: t.note.clone(),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

/// Handle the breakdown command
pub fn handle_breakdown_command(
    ctx: &CommandContext,
    account: &str,
    categories: &[String],
) -> LedgerResult<()> {
    let wallet = ctx.load_wallet(account)?;
    let breakdown = ReportService::default().category_breakdown(&wallet, categories);

    for item in breakdown {
        println!("{}:", item.category);
        if !item.known {
            println!("  Category not found in wallet.");
            continue;
        }
        println!("  Income:  {}", ctx.format_money(item.incomes));
        println!("  Expense: {}", ctx.format_money(item.expenses));
        match (item.budget, item.remaining) {
            (Some(budget), Some(remaining)) => println!(
                "  Budget:  {}, remaining {}",
                ctx.format_money(budget),
                ctx.format_money(remaining)
            ),
            _ => println!("  No budget set"),
        }
    }

    Ok(())
}
