use thiserror::Error;

/// Failure to map stored or typed text onto one of the closed enumerations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

/// Form input rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Please select a category")]
    MissingCategory,

    #[error("Please select a date")]
    MissingDate,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Description must be less than 200 characters")]
    DescriptionTooLong,

    #[error("Please fill in all fields with valid values")]
    IncompleteBudget,

    #[error(transparent)]
    Model(#[from] ModelError),
}
