use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Upi,
    NetBanking,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::Upi => "UPI",
            Self::NetBanking => "Net Banking",
            Self::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "credit card" | "creditcard" | "credit" => Ok(Self::CreditCard),
            "debit card" | "debitcard" | "debit" => Ok(Self::DebitCard),
            "upi" => Ok(Self::Upi),
            "net banking" | "netbanking" => Ok(Self::NetBanking),
            "other" => Ok(Self::Other),
            _ => Err(ModelError::UnknownPaymentMethod(s.to_string())),
        }
    }

    pub fn all() -> &'static [PaymentMethod] {
        &[
            Self::Cash,
            Self::CreditCard,
            Self::DebitCard,
            Self::Upi,
            Self::NetBanking,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
