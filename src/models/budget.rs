use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Category, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: Option<i64>,
    pub user_id: String,
    /// Always the first day of the budgeted month.
    pub month: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub month: NaiveDate,
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: String,
    /// Format: "YYYY-MM"
    pub month: String,
}

impl BudgetDraft {
    pub fn validate(&self) -> Result<NewBudget, ValidationError> {
        let category = self.category.trim();
        let amount = Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|a| *a > Decimal::ZERO);
        let amount = match amount {
            Some(a) if !category.is_empty() => a,
            _ => return Err(ValidationError::IncompleteBudget),
        };
        let category = Category::parse(category)?;
        let month = parse_month(&self.month)?;
        Ok(NewBudget {
            month,
            category,
            amount,
        })
    }
}

/// Parse "YYYY-MM" into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidMonth(s.to_string()))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
