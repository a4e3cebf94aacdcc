use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use super::error::{AnalyticsError, Result};
use crate::models::{first_of_month, Category, Expense};

pub const DEFAULT_MONTH_WINDOW: usize = 6;
pub const DEFAULT_TRAILING_DAYS: i64 = 30;
pub const DEFAULT_DAY_WINDOW: usize = 14;
pub const DEFAULT_TOP_CATEGORIES: usize = 3;

const SECONDS_PER_DAY: i64 = 86_400;

/// Round a monetary value for output. Only applied to final sums.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    pub month_to_date: Decimal,
    pub year_to_date: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase,
    Decrease,
    Unchanged,
}

impl Trend {
    pub fn of(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Self::Increase
        } else if change < Decimal::ZERO {
            Self::Decrease
        } else {
            Self::Unchanged
        }
    }
}

fn sum_where<F>(expenses: &[Expense], keep: F) -> Decimal
where
    F: Fn(&Expense) -> bool,
{
    let total: Decimal = expenses.iter().filter(|e| keep(e)).map(|e| e.amount).sum();
    round_money(total)
}

/// Total of every expense in the snapshot.
pub fn total_spent(expenses: &[Expense]) -> Decimal {
    sum_where(expenses, |_| true)
}

/// Per-category totals in order of each category's first appearance.
pub fn category_totals(expenses: &[Expense]) -> Vec<(Category, Decimal)> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, sum)) => *sum += expense.amount,
            None => totals.push((expense.category, expense.amount)),
        }
    }
    totals
        .into_iter()
        .map(|(c, sum)| (c, round_money(sum)))
        .collect()
}

/// Chronological per-month totals, keeping the last `window` months that
/// have any spending.
pub fn monthly_totals(expenses: &[Expense], window: usize) -> Vec<(String, Decimal)> {
    let mut groups: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for expense in expenses {
        *groups.entry(first_of_month(expense.date)).or_default() += expense.amount;
    }
    trailing(groups, window, |month| month.format("%b %Y").to_string())
}

/// Chronological per-day totals for expenses whose midnight falls on or after
/// `now - trailing_days`, keeping the last `window` days.
///
/// A window too large to represent has no cutoff. A negative window puts the
/// cutoff after `now`, so only future-dated expenses remain.
pub fn daily_totals(
    expenses: &[Expense],
    now: NaiveDateTime,
    trailing_days: i64,
    window: usize,
) -> Vec<(String, Decimal)> {
    let cutoff = Duration::try_days(trailing_days).and_then(|d| now.checked_sub_signed(d));
    let in_range = |e: &&Expense| cutoff.map_or(true, |c| e.date.and_time(NaiveTime::MIN) >= c);
    let mut groups: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for expense in expenses.iter().filter(in_range) {
        *groups.entry(expense.date).or_default() += expense.amount;
    }
    trailing(groups, window, |day| day.format("%b %-d").to_string())
}

fn trailing<L>(
    groups: BTreeMap<NaiveDate, Decimal>,
    window: usize,
    label: L,
) -> Vec<(String, Decimal)>
where
    L: Fn(&NaiveDate) -> String,
{
    let skip = groups.len().saturating_sub(window);
    groups
        .iter()
        .skip(skip)
        .map(|(key, sum)| (label(key), round_money(*sum)))
        .collect()
}

pub fn period_totals(expenses: &[Expense], now: NaiveDateTime) -> PeriodTotals {
    let today = now.date();
    let month_start = first_of_month(today);
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(month_start);
    PeriodTotals {
        month_to_date: sum_where(expenses, |e| e.date >= month_start),
        year_to_date: sum_where(expenses, |e| e.date >= year_start),
    }
}

/// Total for the whole calendar month before `now`'s month.
pub fn previous_month_total(expenses: &[Expense], now: NaiveDateTime) -> Decimal {
    let this_month = first_of_month(now.date());
    let Some(last_month) = this_month.checked_sub_months(Months::new(1)) else {
        return Decimal::ZERO;
    };
    sum_where(expenses, |e| e.date >= last_month && e.date < this_month)
}

/// Total spend divided by the whole days elapsed since the earliest expense
/// (at least one).
pub fn average_daily_spend(expenses: &[Expense], now: NaiveDateTime) -> Result<Decimal> {
    let earliest = expenses
        .iter()
        .map(|e| e.date)
        .min()
        .ok_or(AnalyticsError::EmptyInput)?;

    let elapsed = (now - earliest.and_time(NaiveTime::MIN)).num_seconds();
    let days = if elapsed <= 0 {
        1
    } else {
        ((elapsed + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
    };

    let total: Decimal = expenses.iter().map(|e| e.amount).sum();
    Ok(round_money(total / Decimal::from(days)))
}

/// Highest `k` totals, ties kept in their incoming order.
pub fn top_categories(totals: &[(Category, Decimal)], k: usize) -> Vec<(Category, Decimal)> {
    let mut sorted = totals.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.truncate(k);
    sorted
}

/// Percentage change from `last_month` to `this_month`; zero when there is
/// nothing to compare against.
pub fn month_over_month_change(this_month: Decimal, last_month: Decimal) -> Decimal {
    if last_month.is_zero() {
        return Decimal::ZERO;
    }
    round_money((this_month - last_month) / last_month * Decimal::ONE_HUNDRED)
}
