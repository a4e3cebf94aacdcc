#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_expense(id: i64, amount: Decimal, category: Category, day: &str, desc: &str) -> Expense {
    Expense {
        id: Some(id),
        user_id: "u1".into(),
        amount,
        category,
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        description: Some(desc.to_string()).filter(|d| !d.is_empty()),
        payment_method: None,
        created_at: String::new(),
    }
}

fn sample() -> Vec<Expense> {
    vec![
        make_expense(1, dec!(20), Category::Food, "2024-01-03", "Pizza night"),
        make_expense(2, dec!(250), Category::Travel, "2024-01-10", "Train to Pune"),
        make_expense(3, dec!(5), Category::Food, "2024-01-01", ""),
        make_expense(4, dec!(80), Category::Entertainment, "2024-01-07", "Concert"),
    ]
}

fn ids(expenses: &[Expense]) -> Vec<i64> {
    expenses.iter().map(|e| e.id.unwrap()).collect()
}

fn draft(amount: &str, category: &str, date: &str) -> ExpenseDraft {
    ExpenseDraft {
        amount: amount.into(),
        category: category.into(),
        date: date.into(),
        ..Default::default()
    }
}

// ── SortOrder ─────────────────────────────────────────────────

#[test]
fn test_sort_order_parse() {
    for order in SortOrder::all() {
        assert_eq!(SortOrder::parse(order.as_str()), Some(*order));
    }
    assert_eq!(SortOrder::parse("AMOUNT"), Some(SortOrder::AmountDesc));
    assert_eq!(SortOrder::parse("name"), None);
    assert_eq!(SortOrder::default(), SortOrder::DateDesc);
}

// ── ExpenseFilter ─────────────────────────────────────────────

#[test]
fn test_default_filter_sorts_newest_first() {
    let shown = ExpenseFilter::default().apply(&sample());
    assert_eq!(ids(&shown), vec![2, 4, 1, 3]);
}

#[test]
fn test_filter_by_category() {
    let filter = ExpenseFilter {
        category: Some(Category::Food),
        ..Default::default()
    };
    assert_eq!(ids(&filter.apply(&sample())), vec![1, 3]);
}

#[test]
fn test_search_matches_description_or_category() {
    let by_desc = ExpenseFilter {
        search: Some("PIZZA".into()),
        ..Default::default()
    };
    assert_eq!(ids(&by_desc.apply(&sample())), vec![1]);

    let by_category = ExpenseFilter {
        search: Some("entertain".into()),
        ..Default::default()
    };
    assert_eq!(ids(&by_category.apply(&sample())), vec![4]);

    let blank = ExpenseFilter {
        search: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(blank.apply(&sample()).len(), 4);
}

#[test]
fn test_filters_combine() {
    let filter = ExpenseFilter {
        category: Some(Category::Food),
        search: Some("train".into()),
        sort: SortOrder::DateAsc,
    };
    assert!(filter.apply(&sample()).is_empty());
}

#[test]
fn test_sort_orders() {
    let expenses = sample();
    let by = |sort| {
        ids(&ExpenseFilter {
            sort,
            ..Default::default()
        }
        .apply(&expenses))
    };
    assert_eq!(by(SortOrder::DateAsc), vec![3, 1, 4, 2]);
    assert_eq!(by(SortOrder::AmountDesc), vec![2, 4, 1, 3]);
    assert_eq!(by(SortOrder::AmountAsc), vec![3, 1, 4, 2]);
}

#[test]
fn test_apply_leaves_input_untouched() {
    let expenses = sample();
    let filter = ExpenseFilter {
        sort: SortOrder::AmountAsc,
        ..Default::default()
    };
    filter.apply(&expenses);
    assert_eq!(ids(&expenses), vec![1, 2, 3, 4]);
}

// ── submit_expense ────────────────────────────────────────────

#[test]
fn test_submit_creates_then_edits() {
    let db = Database::open_in_memory().unwrap();

    let created = submit_expense(&db, "u1", EditMode::Creating, &draft("12", "Food", "2024-05-01"))
        .unwrap();
    let SaveOutcome::Created(id) = created else {
        panic!("expected a new expense, got {created:?}");
    };

    let mut edit = ExpenseDraft::from_expense(&db.get_expense(id, "u1").unwrap().unwrap());
    edit.amount = "15.50".into();
    edit.description = "Brunch".into();
    let updated = submit_expense(&db, "u1", EditMode::Editing(id), &edit).unwrap();
    assert_eq!(updated, SaveOutcome::Updated(id));

    let stored = db.get_expense(id, "u1").unwrap().unwrap();
    assert_eq!(stored.amount, dec!(15.50));
    assert_eq!(stored.description.as_deref(), Some("Brunch"));
    assert_eq!(db.get_expenses("u1").unwrap().len(), 1);
}

#[test]
fn test_submit_rejects_invalid_draft() {
    let db = Database::open_in_memory().unwrap();
    let err = submit_expense(&db, "u1", EditMode::Creating, &draft("-1", "Food", "2024-05-01"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Amount must be a positive number");
    assert!(db.get_expenses("u1").unwrap().is_empty());
}

#[test]
fn test_submit_edit_of_missing_expense_fails() {
    let db = Database::open_in_memory().unwrap();
    let result = submit_expense(&db, "u1", EditMode::Editing(7), &draft("1", "Food", "2024-05-01"));
    assert!(result.is_err());
}
