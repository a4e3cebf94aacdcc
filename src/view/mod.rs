//! List view configuration and the create-or-edit submission path.

use anyhow::Result;

use crate::db::{Database, SaveOutcome};
use crate::models::{Category, Expense, ExpenseDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" | "date" => Some(Self::DateDesc),
            "date-asc" => Some(Self::DateAsc),
            "amount-desc" | "amount" => Some(Self::AmountDesc),
            "amount-asc" => Some(Self::AmountAsc),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [SortOrder] {
        &[
            Self::DateDesc,
            Self::DateAsc,
            Self::AmountDesc,
            Self::AmountAsc,
        ]
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the expense list shows. Built once per request and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ExpenseFilter {
    pub(crate) category: Option<Category>,
    pub(crate) search: Option<String>,
    pub(crate) sort: SortOrder,
}

impl ExpenseFilter {
    pub(crate) fn matches(&self, expense: &Expense) -> bool {
        if self.category.is_some_and(|c| c != expense.category) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                expense
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
                    || expense.category.as_str().to_lowercase().contains(&term)
            }
        }
    }

    pub(crate) fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut shown: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        match self.sort {
            SortOrder::DateDesc => shown.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::DateAsc => shown.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::AmountDesc => shown.sort_by(|a, b| b.amount.cmp(&a.amount)),
            SortOrder::AmountAsc => shown.sort_by(|a, b| a.amount.cmp(&b.amount)),
        }
        shown
    }
}

/// Whether a submitted draft creates a new expense or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditMode {
    Creating,
    Editing(i64),
}

/// Validate a draft and write it according to `mode`.
pub(crate) fn submit_expense(
    db: &Database,
    user_id: &str,
    mode: EditMode,
    draft: &ExpenseDraft,
) -> Result<SaveOutcome> {
    let expense = draft.validate()?;
    match mode {
        EditMode::Creating => {
            let id = db.insert_expense(&Expense::new(user_id.to_string(), expense))?;
            Ok(SaveOutcome::Created(id))
        }
        EditMode::Editing(id) => {
            db.update_expense(id, user_id, &expense)?;
            Ok(SaveOutcome::Updated(id))
        }
    }
}

#[cfg(test)]
mod tests;
