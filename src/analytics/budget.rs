use rust_decimal::Decimal;

use super::aggregate::round_money;
use crate::models::{first_of_month, Budget, Category, Expense};

const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::NearLimit => "Close to limit",
            Self::OverBudget => "Over budget!",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetProgress {
    pub status: BudgetStatus,
    /// Spent as a percentage of the cap, uncapped.
    pub percentage: Decimal,
    /// Negative once the cap is exceeded.
    pub remaining: Decimal,
}

impl BudgetProgress {
    /// Percentage clamped to 100, for progress bars.
    pub fn bar_percentage(&self) -> Decimal {
        self.percentage.min(Decimal::ONE_HUNDRED)
    }
}

pub fn budget_status(budget_amount: Decimal, spent: Decimal) -> BudgetProgress {
    let percentage = if budget_amount > Decimal::ZERO {
        spent / budget_amount * Decimal::ONE_HUNDRED
    } else if spent > Decimal::ZERO {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let status = if percentage >= Decimal::ONE_HUNDRED {
        BudgetStatus::OverBudget
    } else if percentage >= NEAR_LIMIT_PERCENT {
        BudgetStatus::NearLimit
    } else {
        BudgetStatus::OnTrack
    };

    BudgetProgress {
        status,
        percentage: round_money(percentage),
        remaining: round_money(budget_amount - spent),
    }
}

/// One budget with what has been spent against it.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub budget_id: Option<i64>,
    pub category: Category,
    pub amount: Decimal,
    pub spent: Decimal,
    pub progress: BudgetProgress,
}

/// Spent-vs-budget view. Only expenses dated inside each budget's month and
/// matching its category count towards it.
pub fn budget_overview(budgets: &[Budget], expenses: &[Expense]) -> Vec<BudgetLine> {
    budgets
        .iter()
        .map(|budget| {
            let spent: Decimal = expenses
                .iter()
                .filter(|e| e.category == budget.category)
                .filter(|e| first_of_month(e.date) == budget.month)
                .map(|e| e.amount)
                .sum();
            let spent = round_money(spent);
            BudgetLine {
                budget_id: budget.id,
                category: budget.category,
                amount: budget.amount,
                spent,
                progress: budget_status(budget.amount, spent),
            }
        })
        .collect()
}
