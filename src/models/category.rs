use super::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    Rent,
    Entertainment,
    Healthcare,
    Education,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label. Unknown labels are rejected rather
    /// than folded into `Other`.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "rent" => Ok(Self::Rent),
            "entertainment" => Ok(Self::Entertainment),
            "healthcare" => Ok(Self::Healthcare),
            "education" => Ok(Self::Education),
            "other" => Ok(Self::Other),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Travel,
            Self::Shopping,
            Self::Bills,
            Self::Rent,
            Self::Entertainment,
            Self::Healthcare,
            Self::Education,
            Self::Other,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
