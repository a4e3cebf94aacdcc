use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Category, PaymentMethod, ValidationError};

pub const MAX_DESCRIPTION_CHARS: usize = 200;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Option<i64>,
    pub user_id: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: String,
}

impl Expense {
    pub fn new(user_id: String, expense: NewExpense) -> Self {
        Self {
            id: None,
            user_id,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            description: expense.description,
            payment_method: expense.payment_method,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A validated expense that has not been assigned an owner or id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

/// Raw expense input as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
    pub payment_method: String,
}

impl ExpenseDraft {
    /// Pre-fill a draft from an existing expense, for editing.
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            category: expense.category.as_str().to_string(),
            date: expense.date.format(DATE_FORMAT).to_string(),
            description: expense.description.clone().unwrap_or_default(),
            payment_method: expense
                .payment_method
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        }
    }

    /// Checks fields in form order and reports the first problem found.
    pub fn validate(&self) -> Result<NewExpense, ValidationError> {
        let amount = Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|a| *a > Decimal::ZERO)
            .ok_or(ValidationError::InvalidAmount)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let category = Category::parse(category)?;

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let payment_method = match self.payment_method.trim() {
            "" => None,
            m => Some(PaymentMethod::parse(m)?),
        };

        Ok(NewExpense {
            amount,
            category,
            date,
            description,
            payment_method,
        })
    }
}
