mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

const EXPENSE_COLUMNS: &str =
    "id, user_id, amount, category, date, description, payment_method, created_at";

/// Whether a save created a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveOutcome {
    Created(i64),
    Updated(i64),
}

impl SaveOutcome {
    pub(crate) fn id(&self) -> i64 {
        match self {
            Self::Created(id) | Self::Updated(id) => *id,
        }
    }
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Apply the schema to a fresh database and stamp its version. An existing
    /// database must already be at `CURRENT_VERSION`.
    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            tracing::info!("Creating schema version {}", schema::CURRENT_VERSION);
            let tx = self.conn.transaction()?;
            tx.execute_batch(schema::SCHEMA_V1)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tx.commit()?;
            return Ok(());
        }

        let version: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .context("Failed to read schema version")?;
        if version != schema::CURRENT_VERSION {
            anyhow::bail!(
                "Unsupported schema version {version} (expected {})",
                schema::CURRENT_VERSION
            );
        }
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (user_id, amount, category, date, description, payment_method, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                expense.user_id,
                expense.amount.to_string(),
                expense.category.as_str(),
                expense.date.format(DATE_FORMAT).to_string(),
                expense.description,
                expense.payment_method.map(|m| m.as_str()),
                expense.created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, user = %expense.user_id, "Inserted expense");
        Ok(id)
    }

    pub(crate) fn insert_expenses_batch(&mut self, expenses: &[Expense]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for expense in expenses {
            tx.execute(
                "INSERT INTO expenses (user_id, amount, category, date, description, payment_method, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    expense.user_id,
                    expense.amount.to_string(),
                    expense.category.as_str(),
                    expense.date.format(DATE_FORMAT).to_string(),
                    expense.description,
                    expense.payment_method.map(|m| m.as_str()),
                    expense.created_at,
                ],
            )?;
        }
        tx.commit()?;
        tracing::info!(count = expenses.len(), "Inserted expense batch");
        Ok(expenses.len())
    }

    pub(crate) fn update_expense(
        &self,
        id: i64,
        user_id: &str,
        expense: &NewExpense,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE expenses
             SET amount = ?1, category = ?2, date = ?3, description = ?4, payment_method = ?5
             WHERE id = ?6 AND user_id = ?7",
            params![
                expense.amount.to_string(),
                expense.category.as_str(),
                expense.date.format(DATE_FORMAT).to_string(),
                expense.description,
                expense.payment_method.map(|m| m.as_str()),
                id,
                user_id,
            ],
        )?;
        if changed == 0 {
            anyhow::bail!("Expense {id} not found");
        }
        tracing::info!(id, "Updated expense");
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64, user_id: &str) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM expenses WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            anyhow::bail!("Expense {id} not found");
        }
        tracing::info!(id, "Deleted expense");
        Ok(())
    }

    pub(crate) fn get_expense(&self, id: i64, user_id: &str) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1 AND user_id = ?2"),
            params![id, user_id],
            expense_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All of a user's expenses, newest first.
    pub(crate) fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = ?1 ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map(params![user_id], expense_from_row)?;
        let expenses = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(count = expenses.len(), user = user_id, "Loaded expenses");
        Ok(expenses)
    }

    /// Expenses dated within `from..=to`, newest first.
    pub(crate) fn get_expenses_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map(
            params![
                user_id,
                from.format(DATE_FORMAT).to_string(),
                to.format(DATE_FORMAT).to_string(),
            ],
            expense_from_row,
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn get_budgets(&self, user_id: &str, month: NaiveDate) -> Result<Vec<Budget>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, month, category, amount FROM budgets
             WHERE user_id = ?1 AND month = ?2 ORDER BY id",
        )?;
        let rows = stmt.query_map(
            params![user_id, month.format(DATE_FORMAT).to_string()],
            budget_from_row,
        )?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Create-or-update: the month's budgets are loaded and the one with the
    /// same category is overwritten, otherwise a new row is inserted.
    pub(crate) fn save_budget(&self, user_id: &str, budget: &NewBudget) -> Result<SaveOutcome> {
        let existing = self.get_budgets(user_id, budget.month)?;
        let matching = existing
            .iter()
            .find(|b| b.category == budget.category)
            .and_then(|b| b.id);

        if let Some(id) = matching {
            self.conn.execute(
                "UPDATE budgets SET amount = ?1 WHERE id = ?2",
                params![budget.amount.to_string(), id],
            )?;
            tracing::info!(id, category = %budget.category, "Updated budget");
            return Ok(SaveOutcome::Updated(id));
        }

        self.conn.execute(
            "INSERT INTO budgets (user_id, month, category, amount) VALUES (?1, ?2, ?3, ?4)",
            params![
                user_id,
                budget.month.format(DATE_FORMAT).to_string(),
                budget.category.as_str(),
                budget.amount.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, category = %budget.category, "Created budget");
        Ok(SaveOutcome::Created(id))
    }

    pub(crate) fn delete_budget(&self, id: i64, user_id: &str) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM budgets WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if changed == 0 {
            anyhow::bail!("Budget {id} not found");
        }
        tracing::info!(id, "Deleted budget");
        Ok(())
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn category_column(row: &Row, idx: usize) -> rusqlite::Result<Category> {
    let raw: String = row.get(idx)?;
    Category::parse(&raw).map_err(|e| conversion_error(idx, e))
}

fn expense_from_row(row: &Row) -> rusqlite::Result<Expense> {
    let payment_method = match row.get::<_, Option<String>>(6)? {
        Some(raw) => Some(PaymentMethod::parse(&raw).map_err(|e| conversion_error(6, e))?),
        None => None,
    };
    Ok(Expense {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        amount: decimal_column(row, 2)?,
        category: category_column(row, 3)?,
        date: date_column(row, 4)?,
        description: row.get(5)?,
        payment_method,
        created_at: row.get(7)?,
    })
}

fn budget_from_row(row: &Row) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: Some(row.get(0)?),
        user_id: row.get(1)?,
        month: date_column(row, 2)?,
        category: category_column(row, 3)?,
        amount: decimal_column(row, 4)?,
    })
}
