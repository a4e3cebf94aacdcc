use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;

use crate::models::{Expense, DATE_FORMAT};

pub(crate) const CSV_HEADERS: [&str; 5] =
    ["Date", "Category", "Amount", "Description", "Payment Method"];

/// Default export file name for a given day, e.g. `expenses-2024-01-31.csv`.
pub(crate) fn default_file_name(today: NaiveDate) -> String {
    format!("expenses-{}.csv", today.format(DATE_FORMAT))
}

/// Write expenses in the given order with every field quoted.
pub(crate) fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for e in expenses {
        wtr.write_record([
            e.date.format(DATE_FORMAT).to_string(),
            e.category.as_str().to_string(),
            e.amount.to_string(),
            e.description.clone().unwrap_or_default(),
            e.payment_method
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(expenses.len())
}

pub(crate) fn export_to_path(path: &Path, expenses: &[Expense]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(file, expenses)?;
    tracing::info!(count, path = %path.display(), "Exported expenses");
    Ok(count)
}
