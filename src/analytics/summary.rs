use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::aggregate::*;
use super::error::{AnalyticsError, Result};
use crate::models::{Category, Expense};

const RECENT_EXPENSES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: Decimal,
    pub this_month: Decimal,
    pub last_month: Decimal,
    pub change: Decimal,
    pub top_category: Option<Category>,
    pub recent: Vec<Expense>,
}

impl DashboardSummary {
    /// Works on any snapshot, including an empty one.
    pub fn build(expenses: &[Expense], now: NaiveDateTime) -> Self {
        let this_month = period_totals(expenses, now).month_to_date;
        let last_month = previous_month_total(expenses, now);
        let top_category = top_categories(&category_totals(expenses), 1)
            .first()
            .map(|(c, _)| *c);

        let mut recent = expenses.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_EXPENSES);

        Self {
            total: total_spent(expenses),
            this_month,
            last_month,
            change: month_over_month_change(this_month, last_month),
            top_category,
            recent,
        }
    }

    pub fn trend(&self) -> Trend {
        Trend::of(self.change)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub by_category: Vec<(Category, Decimal)>,
    pub monthly: Vec<(String, Decimal)>,
    pub daily: Vec<(String, Decimal)>,
    pub periods: PeriodTotals,
    pub average_daily: Decimal,
    pub top_categories: Vec<(Category, Decimal)>,
}

impl AnalyticsReport {
    pub fn build(expenses: &[Expense], now: NaiveDateTime) -> Result<Self> {
        if expenses.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }
        let by_category = category_totals(expenses);
        let top = top_categories(&by_category, DEFAULT_TOP_CATEGORIES);
        Ok(Self {
            monthly: monthly_totals(expenses, DEFAULT_MONTH_WINDOW),
            daily: daily_totals(expenses, now, DEFAULT_TRAILING_DAYS, DEFAULT_DAY_WINDOW),
            periods: period_totals(expenses, now),
            average_daily: average_daily_spend(expenses, now)?,
            top_categories: top,
            by_category,
        })
    }

    /// Share of the overall total for a category total, in whole percent.
    pub fn share_of_total(&self, amount: Decimal) -> Decimal {
        let total: Decimal = self.by_category.iter().map(|(_, v)| *v).sum();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        (amount / total * Decimal::ONE_HUNDRED).round()
    }
}
