//! Spending aggregation over an already-fetched expense snapshot.
//!
//! Everything here is a pure function of its inputs plus an explicit `now`;
//! nothing touches the store or keeps state between calls.

mod aggregate;
mod budget;
mod error;
mod summary;

pub use aggregate::*;
pub use budget::{budget_overview, budget_status, BudgetLine, BudgetProgress, BudgetStatus};
pub use error::AnalyticsError;
pub use summary::{AnalyticsReport, DashboardSummary};
