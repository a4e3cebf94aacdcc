#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{Category, PaymentMethod};
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ── parse_amount_text ─────────────────────────────────────────

#[test]
fn test_parse_amount_text_strips_symbols() {
    assert_eq!(parse_amount_text("₹1,250.00"), "1250.00");
    assert_eq!(parse_amount_text(" $42.99 "), "42.99");
    assert_eq!(parse_amount_text("7"), "7");
}

// ── read_drafts ───────────────────────────────────────────────

#[test]
fn test_read_drafts_quoted_export_layout() {
    let csv = "\"Date\",\"Category\",\"Amount\",\"Description\",\"Payment Method\"\n\
               \"2024-01-05\",\"Food\",\"100\",\"Lunch, with team\",\"UPI\"\n";
    let drafts = CsvImporter::read_drafts(csv.as_bytes()).unwrap();
    assert_eq!(drafts.len(), 1);
    let (line, draft) = &drafts[0];
    assert_eq!(*line, 2);
    assert_eq!(draft.date, "2024-01-05");
    assert_eq!(draft.description, "Lunch, with team");
    assert_eq!(draft.payment_method, "UPI");
}

#[test]
fn test_read_drafts_missing_optional_columns() {
    let csv = "Date,Category,Amount\n2024-02-01,Travel,30\n";
    let drafts = CsvImporter::read_drafts(csv.as_bytes()).unwrap();
    assert_eq!(drafts[0].1.description, "");
    assert_eq!(drafts[0].1.payment_method, "");
}

#[test]
fn test_read_drafts_rejects_unknown_header() {
    let csv = "When,What,HowMuch\n2024-02-01,Travel,30\n";
    let err = CsvImporter::read_drafts(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("Unrecognized CSV header"));
}

#[test]
fn test_read_drafts_header_case_insensitive() {
    let csv = "date,CATEGORY,amount\n2024-02-01,Travel,30\n";
    assert_eq!(CsvImporter::read_drafts(csv.as_bytes()).unwrap().len(), 1);
}

// ── parse ─────────────────────────────────────────────────────

#[test]
fn test_parse_valid_rows() {
    let csv = "Date,Category,Amount,Description,Payment Method\n\
               2024-01-05,Food,100,,\n\
               2024-01-20,food,\"₹1,050.50\",Dinner,Credit Card\n";
    let expenses = CsvImporter::parse(csv.as_bytes()).unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].amount, dec!(100));
    assert!(expenses[0].description.is_none());
    assert!(expenses[0].payment_method.is_none());
    assert_eq!(expenses[1].category, Category::Food);
    assert_eq!(expenses[1].amount, dec!(1050.50));
    assert_eq!(expenses[1].payment_method, Some(PaymentMethod::CreditCard));
}

#[test]
fn test_parse_reports_failing_row() {
    let csv = "Date,Category,Amount\n\
               2024-01-05,Food,100\n\
               2024-01-06,Food,-4\n";
    let err = CsvImporter::parse(csv.as_bytes()).unwrap_err();
    assert_eq!(err.to_string(), "Row 3: Amount must be a positive number");
}

#[test]
fn test_parse_unknown_category() {
    let csv = "Date,Category,Amount\n2024-01-05,Groceries,10\n";
    let err = CsvImporter::parse(csv.as_bytes()).unwrap_err();
    assert_eq!(err.to_string(), "Row 2: Unknown category: Groceries");
}

#[test]
fn test_parse_header_only() {
    let csv = "Date,Category,Amount,Description,Payment Method\n";
    assert!(CsvImporter::parse(csv.as_bytes()).is_err());
}

#[test]
fn test_parse_path() {
    let file = make_csv_file("Date,Category,Amount\n2024-03-01,Bills,55.10\n");
    let expenses = CsvImporter::parse_path(file.path()).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, Category::Bills);
}

#[test]
fn test_parse_path_missing_file() {
    let err = CsvImporter::parse_path(Path::new("/nonexistent/expenses.csv")).unwrap_err();
    assert!(err.to_string().contains("Failed to open CSV file"));
}
