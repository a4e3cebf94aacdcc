use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::export::CSV_HEADERS;
use crate::models::{ExpenseDraft, NewExpense};

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read rows in export layout into unvalidated drafts, each tagged with
    /// its line number in the file.
    pub(crate) fn read_drafts<R: Read>(reader: R) -> Result<Vec<(u64, ExpenseDraft)>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers().context("Failed to read CSV header")?.clone();
        check_headers(&headers)?;

        let mut drafts = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let line = record.position().map_or(0, |p| p.line());
            let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            drafts.push((line, ExpenseDraft {
                date: field(0),
                category: field(1),
                amount: parse_amount_text(&field(2)),
                description: field(3),
                payment_method: field(4),
            }));
        }
        Ok(drafts)
    }

    /// Validate every draft, failing on the first bad row.
    pub(crate) fn parse<R: Read>(reader: R) -> Result<Vec<NewExpense>> {
        let drafts = Self::read_drafts(reader)?;
        if drafts.is_empty() {
            anyhow::bail!("CSV file has no expenses");
        }
        drafts
            .iter()
            .map(|(line, draft)| {
                draft
                    .validate()
                    .map_err(|e| anyhow::anyhow!("Row {line}: {e}"))
            })
            .collect()
    }

    pub(crate) fn parse_path(path: &Path) -> Result<Vec<NewExpense>> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::parse(file)
    }
}

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let required = &CSV_HEADERS[..3];
    let matches = required.iter().enumerate().all(|(i, expected)| {
        headers
            .get(i)
            .is_some_and(|h| h.trim().eq_ignore_ascii_case(expected))
    });
    if !matches {
        anyhow::bail!(
            "Unrecognized CSV header, expected: {}",
            CSV_HEADERS.join(",")
        );
    }
    Ok(())
}

/// Strip currency symbols and thousands separators so "₹1,250.00" reads as "1250.00".
fn parse_amount_text(raw: &str) -> String {
    raw.replace(['$', '₹', ','], "").trim().to_string()
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
