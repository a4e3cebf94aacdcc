use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("No expenses to analyze")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
