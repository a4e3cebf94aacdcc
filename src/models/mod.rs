mod budget;
mod category;
mod error;
mod expense;
mod payment_method;

pub use budget::{first_of_month, parse_month, Budget, BudgetDraft, NewBudget};
pub use category::Category;
pub use error::{ModelError, ValidationError};
pub use expense::{Expense, ExpenseDraft, NewExpense, DATE_FORMAT, MAX_DESCRIPTION_CHARS};
pub use payment_method::PaymentMethod;
