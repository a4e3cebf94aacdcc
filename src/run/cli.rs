use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::analytics::{budget_overview, AnalyticsError, AnalyticsReport, DashboardSummary, Trend};
use crate::config::Config;
use crate::db::{Database, SaveOutcome};
use crate::export;
use crate::format::{format_amount, format_change, progress_bar, truncate};
use crate::import::CsvImporter;
use crate::models::{
    first_of_month, parse_month, BudgetDraft, Category, Expense, ExpenseDraft, PaymentMethod,
    DATE_FORMAT,
};
use crate::view::{submit_expense, EditMode, ExpenseFilter, SortOrder};

const DESCRIPTION_WIDTH: usize = 32;
const BAR_WIDTH: usize = 20;

/// Flags followed by a value argument.
const VALUE_FLAGS: [&str; 8] = [
    "--user",
    "--amount",
    "--category",
    "--date",
    "--description",
    "--payment",
    "--search",
    "--sort",
];

/// Per-invocation context: who is acting, how money is printed, and when "now" is.
struct Session<'a> {
    db: &'a mut Database,
    user: String,
    currency: &'a str,
    now: NaiveDateTime,
}

impl Session<'_> {
    fn money(&self, amount: Decimal) -> String {
        format_amount(amount, self.currency)
    }
}

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    let (user, args) = split_user(args);
    let mut session = Session {
        db,
        user: user.unwrap_or_else(|| config.user.clone()),
        currency: &config.currency,
        now: Local::now().naive_local(),
    };
    tracing::debug!(user = %session.user, command = ?args.first(), "Running command");

    let command = args.first().map(String::as_str).unwrap_or("dashboard");
    let rest = args.get(1..).unwrap_or_default();
    match command {
        "dashboard" | "d" => cli_dashboard(&session),
        "analytics" | "a" => cli_analytics(&session),
        "list" | "ls" => cli_list(rest, &session),
        "add" => cli_add(rest, &session),
        "edit" => cli_edit(rest, &session),
        "delete" | "rm" => cli_delete(rest, &session),
        "export" => cli_export(rest, &session),
        "import" => cli_import(rest, &mut session),
        "budget" | "b" => cli_budget(rest, &session),
        "categories" => {
            print_categories();
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendwise {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Spendwise: personal expense tracker");
    println!();
    println!("Usage: spendwise [--user <id>] [command]");
    println!();
    println!("Commands:");
    println!("  dashboard                     Spending summary and recent expenses (default)");
    println!("  analytics                     Category, monthly and daily breakdowns");
    println!("  list                          List expenses");
    println!("    --category <name>           Only this category");
    println!("    --search <text>             Match description or category");
    println!("    --sort <order>              date-desc, date-asc, amount-desc, amount-asc");
    println!("  add --amount <n> --category <name> [--date YYYY-MM-DD]");
    println!("      [--description <text>] [--payment <method>]");
    println!("                                Record an expense (date defaults to today)");
    println!("  edit <id> [same flags as add] Change fields of an existing expense");
    println!("  delete <id>                   Delete an expense");
    println!("  export [path]                 Export the (filtered) list to CSV");
    println!("  import <file.csv>             Import expenses from a CSV export");
    println!("  budget [YYYY-MM]              Budget progress for a month (default: current)");
    println!("  budget set <category> <amount> [YYYY-MM]");
    println!("                                Create or update a monthly budget");
    println!("  budget delete <id>            Delete a budget");
    println!("  categories                    List categories, payment methods, sort orders");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Argument helpers ─────────────────────────────────────────

/// Pull a global `--user <id>` out of the argument list.
fn split_user(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut user = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--user" {
            user = iter.next().cloned();
        } else {
            rest.push(arg.clone());
        }
    }
    (user, rest)
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == name).map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_id(raw: Option<&str>, what: &str) -> Result<i64> {
    let raw = raw.ok_or_else(|| anyhow::anyhow!("Missing {what} id"))?;
    raw.parse().with_context(|| format!("Invalid {what} id: {raw}"))
}

fn filter_from_args(args: &[String]) -> Result<ExpenseFilter> {
    let category = flag(args, "--category").map(Category::parse).transpose()?;
    let sort = match flag(args, "--sort") {
        Some(s) => {
            SortOrder::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown sort order: {s}"))?
        }
        None => SortOrder::default(),
    };
    Ok(ExpenseFilter {
        category,
        search: flag(args, "--search").map(str::to_string),
        sort,
    })
}

/// Overlay any expense flags present in `args` onto `draft`.
fn apply_expense_flags(draft: &mut ExpenseDraft, args: &[String]) {
    let fields: [(&str, &mut String); 5] = [
        ("--amount", &mut draft.amount),
        ("--category", &mut draft.category),
        ("--date", &mut draft.date),
        ("--description", &mut draft.description),
        ("--payment", &mut draft.payment_method),
    ];
    for (name, field) in fields {
        if let Some(value) = flag(args, name) {
            *field = value.to_string();
        }
    }
}

fn last_day_of_month(month: NaiveDate) -> NaiveDate {
    month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(month)
}

// ── Dashboard & analytics ────────────────────────────────────

fn cli_dashboard(session: &Session) -> Result<()> {
    let expenses = session.db.get_expenses(&session.user)?;
    let summary = DashboardSummary::build(&expenses, session.now);

    println!("Spendwise: {}", session.now.format("%B %Y"));
    println!("{}", "─".repeat(40));
    println!("  Total spent:  {}", session.money(summary.total));
    println!("  This month:   {}", session.money(summary.this_month));
    println!("  Last month:   {}", session.money(summary.last_month));
    let arrow = match summary.trend() {
        Trend::Increase => "▲",
        Trend::Decrease => "▼",
        Trend::Unchanged => "=",
    };
    println!("  Change:       {arrow} {}", format_change(summary.change));
    println!(
        "  Top category: {}",
        summary.top_category.map_or("None", |c| c.as_str())
    );

    println!();
    if summary.recent.is_empty() {
        println!("No expenses yet. Add one with `spendwise add`.");
    } else {
        println!("Recent expenses:");
        print_expense_table(session, &summary.recent);
    }
    Ok(())
}

fn cli_analytics(session: &Session) -> Result<()> {
    let expenses = session.db.get_expenses(&session.user)?;
    let report = match AnalyticsReport::build(&expenses, session.now) {
        Ok(report) => report,
        Err(AnalyticsError::EmptyInput) => {
            println!("No expense data available for analytics.");
            return Ok(());
        }
    };

    println!("Spending by category:");
    for (category, amount) in &report.by_category {
        println!(
            "  {:<16} {:>14}  {:>3}%",
            category.as_str(),
            session.money(*amount),
            report.share_of_total(*amount)
        );
    }

    println!();
    println!("Top categories:");
    for (rank, (category, amount)) in report.top_categories.iter().enumerate() {
        println!("  {}. {:<13} {:>14}", rank + 1, category.as_str(), session.money(*amount));
    }

    println!();
    println!("Monthly spending:");
    for (label, amount) in &report.monthly {
        println!("  {label:<16} {:>14}", session.money(*amount));
    }

    println!();
    println!("Daily spending (last 30 days):");
    if report.daily.is_empty() {
        println!("  No expenses in the last 30 days");
    }
    for (label, amount) in &report.daily {
        println!("  {label:<16} {:>14}", session.money(*amount));
    }

    println!();
    println!("  Month to date:        {}", session.money(report.periods.month_to_date));
    println!("  Year to date:         {}", session.money(report.periods.year_to_date));
    println!("  Average daily spend:  {}", session.money(report.average_daily));
    Ok(())
}

// ── Expense list & CRUD ──────────────────────────────────────

fn print_expense_table(session: &Session, expenses: &[Expense]) {
    println!(
        "{:<5} {:<10} {:<14} {:>14}  {:<12} Description",
        "ID", "Date", "Category", "Amount", "Payment"
    );
    println!("{}", "─".repeat(90));
    for e in expenses {
        println!(
            "{:<5} {:<10} {:<14} {:>14}  {:<12} {}",
            e.id.unwrap_or(0),
            e.date.format(DATE_FORMAT),
            e.category.as_str(),
            session.money(e.amount),
            e.payment_method.map_or("", |m| m.as_str()),
            truncate(e.description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH),
        );
    }
}

fn cli_list(args: &[String], session: &Session) -> Result<()> {
    let filter = filter_from_args(args)?;
    let expenses = filter.apply(&session.db.get_expenses(&session.user)?);
    if expenses.is_empty() {
        println!("No expenses found");
        return Ok(());
    }
    print_expense_table(session, &expenses);
    println!();
    println!("{} expense(s), sorted by {}", expenses.len(), filter.sort);
    Ok(())
}

fn cli_add(args: &[String], session: &Session) -> Result<()> {
    let mut draft = ExpenseDraft {
        date: session.now.date().format(DATE_FORMAT).to_string(),
        ..Default::default()
    };
    apply_expense_flags(&mut draft, args);
    let outcome = submit_expense(&*session.db, &session.user, EditMode::Creating, &draft)?;
    println!("Expense added successfully (id {})", outcome.id());
    Ok(())
}

fn cli_edit(args: &[String], session: &Session) -> Result<()> {
    let id = parse_id(positionals(args).first().copied(), "expense")?;
    let existing = session
        .db
        .get_expense(id, &session.user)?
        .ok_or_else(|| anyhow::anyhow!("Expense {id} not found"))?;

    let mut draft = ExpenseDraft::from_expense(&existing);
    apply_expense_flags(&mut draft, args);
    submit_expense(&*session.db, &session.user, EditMode::Editing(id), &draft)?;
    println!("Expense updated successfully");
    Ok(())
}

fn cli_delete(args: &[String], session: &Session) -> Result<()> {
    let id = parse_id(positionals(args).first().copied(), "expense")?;
    session.db.delete_expense(id, &session.user)?;
    println!("Expense deleted successfully");
    Ok(())
}

// ── CSV ──────────────────────────────────────────────────────

fn cli_export(args: &[String], session: &Session) -> Result<()> {
    let filter = filter_from_args(args)?;
    let expenses = filter.apply(&session.db.get_expenses(&session.user)?);
    if expenses.is_empty() {
        println!("No expenses to export");
        return Ok(());
    }

    let path = positionals(args)
        .first()
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| PathBuf::from(export::default_file_name(session.now.date())));
    let count = export::export_to_path(&path, &expenses)?;
    println!("Exported {count} expenses to {}", path.display());
    Ok(())
}

fn cli_import(args: &[String], session: &mut Session) -> Result<()> {
    let file_path = positionals(args)
        .first()
        .map(|p| shellexpand(p))
        .ok_or_else(|| anyhow::anyhow!("Usage: spendwise import <file.csv>"))?;
    let path = PathBuf::from(&file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let expenses: Vec<Expense> = CsvImporter::parse_path(&path)?
        .into_iter()
        .map(|e| Expense::new(session.user.clone(), e))
        .collect();
    let count = session.db.insert_expenses_batch(&expenses)?;
    println!("Imported {count} expenses");
    Ok(())
}

// ── Budgets ──────────────────────────────────────────────────

fn cli_budget(args: &[String], session: &Session) -> Result<()> {
    let positional = positionals(args);
    match positional.first().copied() {
        Some("set") => cli_budget_set(&positional[1..], session),
        Some("delete") | Some("rm") => {
            let id = parse_id(positional.get(1).copied(), "budget")?;
            session.db.delete_budget(id, &session.user)?;
            println!("Budget deleted successfully");
            Ok(())
        }
        month => cli_budget_show(month, session),
    }
}

fn current_month_key(session: &Session) -> String {
    session.now.format("%Y-%m").to_string()
}

fn cli_budget_set(args: &[&str], session: &Session) -> Result<()> {
    let draft = BudgetDraft {
        category: args.first().copied().unwrap_or_default().to_string(),
        amount: args.get(1).copied().unwrap_or_default().to_string(),
        month: args
            .get(2)
            .map_or_else(|| current_month_key(session), |m| m.to_string()),
    };
    let budget = draft.validate()?;
    match session.db.save_budget(&session.user, &budget)? {
        SaveOutcome::Created(_) => println!("Budget created successfully"),
        SaveOutcome::Updated(_) => println!("Budget updated successfully"),
    }
    Ok(())
}

fn cli_budget_show(month: Option<&str>, session: &Session) -> Result<()> {
    let month = match month {
        Some(m) => parse_month(m)?,
        None => first_of_month(session.now.date()),
    };
    let budgets = session.db.get_budgets(&session.user, month)?;

    println!("Budgets for {}", month.format("%B %Y"));
    println!("{}", "─".repeat(72));
    if budgets.is_empty() {
        println!("No budgets set for this month");
        return Ok(());
    }

    let month_end = last_day_of_month(month);
    let expenses = session
        .db
        .get_expenses_between(&session.user, month, month_end)?;
    for line in budget_overview(&budgets, &expenses) {
        println!(
            "{:<4} {:<14} {} {:>5}%  {} of {}",
            line.budget_id.unwrap_or(0),
            line.category.as_str(),
            progress_bar(line.progress.bar_percentage(), BAR_WIDTH),
            line.progress.percentage,
            session.money(line.spent),
            session.money(line.amount),
        );
        let remaining = if line.progress.remaining < Decimal::ZERO {
            format!("{} over", session.money(line.progress.remaining.abs()))
        } else {
            format!("{} left", session.money(line.progress.remaining))
        };
        println!("     {}: {remaining}", line.progress.status);
    }
    if month.year() == session.now.year() && month.month() == session.now.month() {
        println!();
        println!("Set or change a budget with `spendwise budget set <category> <amount>`");
    }
    Ok(())
}

fn print_categories() {
    println!("Categories:");
    for c in Category::all() {
        println!("  {c}");
    }
    println!();
    println!("Payment methods:");
    for m in PaymentMethod::all() {
        println!("  {m}");
    }
    println!();
    println!("Sort orders:");
    for s in SortOrder::all() {
        println!("  {s}");
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
